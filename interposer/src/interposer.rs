use libc::{c_char, c_void, size_t};
use std::ffi::CStr;
use std::slice;

use crate::{Genuine, Match, SinkSlot, Suffix};

/// Destination opened in place of a matched path. Opening it always succeeds
/// for any mode and whatever is written to it is discarded.
pub const DISCARD_PATH: &CStr = c"/dev/null";

/// Interception context: the configured suffix, the sink handle reference
/// and the genuine operations to delegate to.
///
/// The methods mirror the hooked libc functions and have the same safety
/// requirements as them.
pub struct Interposer<G> {
    genuine: G,
    suffix: Suffix,
    sink: SinkSlot,
}

impl<G: Genuine> Interposer<G> {
    pub fn new(genuine: G, suffix: Suffix) -> Self {
        Interposer {
            genuine,
            suffix,
            sink: SinkSlot::default(),
        }
    }

    pub fn genuine(&self) -> &G {
        &self.genuine
    }

    pub fn sink(&self) -> &SinkSlot {
        &self.sink
    }

    /// Replacement for `fopen`.
    ///
    /// A matched path is never touched: [`DISCARD_PATH`] is opened instead,
    /// with the caller's mode, and the descriptor of the resulting stream
    /// becomes the sink. Any other path is opened by the genuine `fopen`.
    pub unsafe fn open(&self, path: *const c_char, mode: *const c_char) -> G::Stream {
        self.open_with(G::fopen, "fopen", path, mode)
    }

    /// Replacement for `fopen64`. Same as [`Interposer::open`].
    pub unsafe fn open64(&self, path: *const c_char, mode: *const c_char) -> G::Stream {
        self.open_with(G::fopen64, "fopen64", path, mode)
    }

    unsafe fn open_with(
        &self,
        genuine_open: unsafe fn(&G, *const c_char, *const c_char) -> G::Stream,
        name: &'static str,
        path: *const c_char,
        mode: *const c_char,
    ) -> G::Stream {
        let (path_str, matched) = self.classify(path);
        if !matched.is_match() {
            tracing::trace!(path = ?path_str, ?matched, "{name}");
            return genuine_open(&self.genuine, path, mode);
        }

        let stream = genuine_open(&self.genuine, DISCARD_PATH.as_ptr(), mode);
        let fd = self.genuine.fileno(stream);
        let previous = self.sink.get();
        match fd {
            Some(fd) => self.sink.set(fd),
            // Same as storing the failed (null) stream: nothing is redirected
            // until the next successful matched open.
            None => self.sink.clear(),
        }
        tracing::trace!(
            path = ?path_str,
            ?matched,
            sink = ?fd,
            ?previous,
            "{name} substituted with {:?}",
            DISCARD_PATH
        );
        stream
    }

    /// Replacement for `fwrite`.
    ///
    /// Writes to the sink are printed on standard output instead, flushed
    /// immediately, and reported as `size * nmemb` regardless of how the
    /// output went. Streams are compared by descriptor number, so any stream
    /// wrapping the sink descriptor is redirected.
    pub unsafe fn write(
        &self,
        ptr: *const c_void,
        size: size_t,
        nmemb: size_t,
        stream: G::Stream,
    ) -> size_t {
        if self.sink.get().is_none() {
            tracing::trace!(size, nmemb, "fwrite");
            return self.genuine.fwrite(ptr, size, nmemb, stream);
        }

        let fd = self.genuine.fileno(stream);
        tracing::trace!(size, nmemb, ?fd, "fwrite");
        let len = match (fd, size.checked_mul(nmemb)) {
            (Some(fd), Some(len)) if self.sink.is_sink(fd) => len,
            _ => return self.genuine.fwrite(ptr, size, nmemb, stream),
        };
        if len == 0 {
            return 0;
        }

        let bytes = slice::from_raw_parts(ptr as *const u8, len);
        if let Err(err) = self.genuine.emit(bytes) {
            tracing::warn!(%err, len, "failed to redirect log write to stdout");
        }
        len
    }

    /// Replacement for `fclose`. Forgets the sink when it is the stream being
    /// closed, so a later unrelated stream reusing the descriptor number is
    /// left alone.
    #[cfg(feature = "clear-on-close")]
    pub unsafe fn close(&self, stream: G::Stream) -> libc::c_int {
        let fd = self.genuine.fileno(stream);
        let cleared = fd.is_some_and(|fd| self.sink.clear_if(fd));
        tracing::trace!(?fd, cleared, "fclose");
        self.genuine.fclose(stream)
    }

    /// Replacement for `truncate`. Truncating a matched path does nothing and
    /// succeeds.
    #[cfg(feature = "truncate")]
    pub unsafe fn truncate(&self, path: *const c_char, length: libc::off_t) -> libc::c_int {
        let (path_str, matched) = self.classify(path);
        tracing::trace!(path = ?path_str, ?matched, length, "truncate");
        if matched.is_match() {
            return 0;
        }
        self.genuine.truncate(path, length)
    }

    /// Replacement for `truncate64`. Same as [`Interposer::truncate`].
    #[cfg(feature = "truncate")]
    pub unsafe fn truncate64(&self, path: *const c_char, length: libc::off64_t) -> libc::c_int {
        let (path_str, matched) = self.classify(path);
        tracing::trace!(path = ?path_str, ?matched, length, "truncate64");
        if matched.is_match() {
            return 0;
        }
        self.genuine.truncate64(path, length)
    }

    unsafe fn classify<'a>(&self, path: *const c_char) -> (Option<&'a CStr>, Match) {
        let path = (!path.is_null()).then(|| CStr::from_ptr(path));
        (path, self.suffix.matches(path.map(CStr::to_bytes)))
    }
}
