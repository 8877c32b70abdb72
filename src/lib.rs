#![doc = include_str!("../README.md")]

mod functions;
mod params;
mod state;

use libc::{c_char, c_void, size_t, FILE};
use state::State;

/// Replacement for the `fopen` libc function.
///
/// If the path ends with the configured suffix, `/dev/null` is opened instead
/// (with the same mode) and the returned stream is remembered, so that writes
/// to it can be redirected to standard output by [`fwrite`].
///
/// # Safety
///
/// Same as `fopen`: `path` and `mode` must be valid C strings.
#[no_mangle]
pub unsafe extern "C" fn fopen(path: *const c_char, mode: *const c_char) -> *mut FILE {
    State::interposer().open(path, mode)
}

/// Replacement for the `fopen64` libc function, used instead of `fopen` by
/// programs built with large file support. Behaves like [`fopen`].
///
/// # Safety
///
/// Same as `fopen64`: `path` and `mode` must be valid C strings.
#[no_mangle]
pub unsafe extern "C" fn fopen64(path: *const c_char, mode: *const c_char) -> *mut FILE {
    State::interposer().open64(path, mode)
}

/// Replacement for the `fwrite` libc function.
///
/// If `stream` wraps the descriptor of the last stream returned for the log
/// file, the data is printed on standard output (and flushed) instead, and
/// `size * nmemb` is returned.
///
/// # Safety
///
/// Same as `fwrite`: `ptr` must point to `size * nmemb` readable bytes and
/// `stream` must be a valid, open stream.
#[no_mangle]
pub unsafe extern "C" fn fwrite(
    ptr: *const c_void,
    size: size_t,
    nmemb: size_t,
    stream: *mut FILE,
) -> size_t {
    State::interposer().write(ptr, size, nmemb, stream)
}

/// Replacement for the `fclose` libc function.
///
/// If the stream being closed is the redirected log file, it stops being
/// tracked, so that a file opened later with the same descriptor number is
/// written normally.
///
/// # Safety
///
/// Same as `fclose`: `stream` must be a valid, open stream.
#[cfg(feature = "clear-on-close")]
#[no_mangle]
pub unsafe extern "C" fn fclose(stream: *mut FILE) -> libc::c_int {
    State::interposer().close(stream)
}

/// Replacement for the `truncate` libc function.
///
/// Truncating the log file does nothing and reports success.
///
/// # Safety
///
/// Same as `truncate`: `path` must be a valid C string.
#[cfg(feature = "truncate")]
#[no_mangle]
pub unsafe extern "C" fn truncate(path: *const c_char, length: libc::off_t) -> libc::c_int {
    State::interposer().truncate(path, length)
}

/// Replacement for the `truncate64` libc function. Behaves like [`truncate`].
///
/// # Safety
///
/// Same as `truncate64`: `path` must be a valid C string.
#[cfg(feature = "truncate")]
#[no_mangle]
pub unsafe extern "C" fn truncate64(path: *const c_char, length: libc::off64_t) -> libc::c_int {
    State::interposer().truncate64(path, length)
}
