//! Access to the original libc functions.
//!
//! The original libc functions are accessed via `dlsym` using the special
//! `RTLD_NEXT` pseudo handle. This handle allows us to access the next
//! occurrence of a function in the search order after the current library,
//! instead of finding the hooks of this library again (which would recurse
//! forever).
//!
//! All of them are resolved at once by [`Functions::resolve`]. A missing
//! symbol is an error: there would be nothing to delegate to.

use interposer::{Error, Genuine};
use libc::{c_char, c_void, dlsym, size_t, FILE, RTLD_NEXT};
use std::ffi::CStr;
use std::io;
use std::mem;
use std::os::unix::io::RawFd;

extern "C" {
    /// The C library's standard output stream.
    static mut stdout: *mut FILE;
}

type FOpenFn = unsafe extern "C" fn(path: *const c_char, mode: *const c_char) -> *mut FILE;
type FWriteFn =
    unsafe extern "C" fn(ptr: *const c_void, size: size_t, nmemb: size_t, stream: *mut FILE) -> size_t;
#[cfg(feature = "clear-on-close")]
type FCloseFn = unsafe extern "C" fn(stream: *mut FILE) -> libc::c_int;
#[cfg(feature = "truncate")]
type TruncateFn = unsafe extern "C" fn(path: *const c_char, length: libc::off_t) -> libc::c_int;
#[cfg(feature = "truncate")]
type Truncate64Fn = unsafe extern "C" fn(path: *const c_char, length: libc::off64_t) -> libc::c_int;

/// The original definitions of the hooked functions.
pub struct Functions {
    fopen: FOpenFn,
    fopen64: FOpenFn,
    fwrite: FWriteFn,
    #[cfg(feature = "clear-on-close")]
    fclose: FCloseFn,
    #[cfg(feature = "truncate")]
    truncate: TruncateFn,
    #[cfg(feature = "truncate")]
    truncate64: Truncate64Fn,
}

impl Functions {
    pub fn resolve() -> Result<Self, Error> {
        // Each symbol is transmuted into the signature libc declares for it.
        unsafe {
            Ok(Functions {
                fopen: mem::transmute::<*mut c_void, FOpenFn>(Self::original_fn(c"fopen")?),
                fopen64: mem::transmute::<*mut c_void, FOpenFn>(Self::original_fn(c"fopen64")?),
                fwrite: mem::transmute::<*mut c_void, FWriteFn>(Self::original_fn(c"fwrite")?),
                #[cfg(feature = "clear-on-close")]
                fclose: mem::transmute::<*mut c_void, FCloseFn>(Self::original_fn(c"fclose")?),
                #[cfg(feature = "truncate")]
                truncate: mem::transmute::<*mut c_void, TruncateFn>(Self::original_fn(
                    c"truncate",
                )?),
                #[cfg(feature = "truncate")]
                truncate64: mem::transmute::<*mut c_void, Truncate64Fn>(Self::original_fn(
                    c"truncate64",
                )?),
            })
        }
    }

    fn original_fn(fn_name: &CStr) -> Result<*mut c_void, Error> {
        let function = unsafe { dlsym(RTLD_NEXT, fn_name.as_ptr()) };
        if function.is_null() {
            return Err(Error::SymbolNotFound(fn_name.to_string_lossy().into_owned()));
        }
        Ok(function)
    }
}

impl Genuine for Functions {
    type Stream = *mut FILE;

    unsafe fn fopen(&self, path: *const c_char, mode: *const c_char) -> *mut FILE {
        (self.fopen)(path, mode)
    }

    unsafe fn fopen64(&self, path: *const c_char, mode: *const c_char) -> *mut FILE {
        (self.fopen64)(path, mode)
    }

    unsafe fn fwrite(
        &self,
        ptr: *const c_void,
        size: size_t,
        nmemb: size_t,
        stream: *mut FILE,
    ) -> size_t {
        (self.fwrite)(ptr, size, nmemb, stream)
    }

    #[cfg(feature = "clear-on-close")]
    unsafe fn fclose(&self, stream: *mut FILE) -> libc::c_int {
        (self.fclose)(stream)
    }

    #[cfg(feature = "truncate")]
    unsafe fn truncate(&self, path: *const c_char, length: libc::off_t) -> libc::c_int {
        (self.truncate)(path, length)
    }

    #[cfg(feature = "truncate")]
    unsafe fn truncate64(&self, path: *const c_char, length: libc::off64_t) -> libc::c_int {
        (self.truncate64)(path, length)
    }

    unsafe fn fileno(&self, stream: *mut FILE) -> Option<RawFd> {
        if stream.is_null() {
            return None;
        }
        // `fileno` is not hooked, the libc one is called directly.
        match libc::fileno(stream) {
            -1 => None,
            fd => Some(fd),
        }
    }

    /// Goes through the C `stdout` stream rather than Rust's, so the output
    /// stays ordered with whatever the host itself prints with stdio.
    fn emit(&self, bytes: &[u8]) -> io::Result<()> {
        unsafe {
            let out = stdout;
            let written = (self.fwrite)(bytes.as_ptr() as *const c_void, 1, bytes.len(), out);
            let flushed = libc::fflush(out) == 0;
            if written < bytes.len() || !flushed {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(())
    }
}
