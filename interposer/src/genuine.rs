use libc::{c_char, c_void, size_t};
use std::io;
use std::os::unix::io::RawFd;

/// The genuine (non-intercepted) operations.
///
/// In the preloaded library these are the next definitions found after the
/// hook itself in the symbol search order. Pass-through calls forward their
/// raw arguments untouched, null pointers included, so the result is the one
/// the host would have seen without the hook.
///
/// # Safety
///
/// The `unsafe` methods have the same requirements as the libc functions of
/// the same name.
pub trait Genuine {
    /// Stream handle, `*mut FILE` for libc. Failed opens return the null
    /// value of this type.
    type Stream: Copy;

    unsafe fn fopen(&self, path: *const c_char, mode: *const c_char) -> Self::Stream;

    unsafe fn fopen64(&self, path: *const c_char, mode: *const c_char) -> Self::Stream;

    unsafe fn fwrite(
        &self,
        ptr: *const c_void,
        size: size_t,
        nmemb: size_t,
        stream: Self::Stream,
    ) -> size_t;

    #[cfg(feature = "clear-on-close")]
    unsafe fn fclose(&self, stream: Self::Stream) -> libc::c_int;

    #[cfg(feature = "truncate")]
    unsafe fn truncate(&self, path: *const c_char, length: libc::off_t) -> libc::c_int;

    #[cfg(feature = "truncate")]
    unsafe fn truncate64(&self, path: *const c_char, length: libc::off64_t) -> libc::c_int;

    /// Descriptor number wrapped by `stream`, or `None` for a null stream.
    unsafe fn fileno(&self, stream: Self::Stream) -> Option<RawFd>;

    /// Write `bytes` to the process's standard output and flush it.
    fn emit(&self, bytes: &[u8]) -> io::Result<()>;
}
