//! The sink handle reference.
//!
//! At most one substituted stream is tracked at a time. Whichever matched open
//! completes last overwrites the previous value, so two matched files open at
//! the same time cannot both be redirected: writes to the older one end up in
//! the discard destination.

use std::os::unix::io::RawFd;
use std::sync::atomic::{AtomicI32, Ordering};

const EMPTY: RawFd = -1;

/// Single slot holding the descriptor number of the current sink stream.
///
/// The descriptor is captured when the stream is opened, so checking a write
/// never touches a `FILE` that may have been closed since. Updates are not
/// serialized with anything else; the atomic only rules out torn reads.
#[derive(Debug)]
pub struct SinkSlot {
    fd: AtomicI32,
}

impl SinkSlot {
    pub const fn new() -> Self {
        SinkSlot {
            fd: AtomicI32::new(EMPTY),
        }
    }

    /// Remember `fd` as the sink, replacing any previous one.
    pub fn set(&self, fd: RawFd) {
        self.fd.store(fd, Ordering::Relaxed);
    }

    pub fn get(&self) -> Option<RawFd> {
        match self.fd.load(Ordering::Relaxed) {
            EMPTY => None,
            fd => Some(fd),
        }
    }

    /// Whether a stream whose descriptor is `fd` is the current sink.
    pub fn is_sink(&self, fd: RawFd) -> bool {
        fd >= 0 && self.get() == Some(fd)
    }

    pub fn clear(&self) {
        self.fd.store(EMPTY, Ordering::Relaxed);
    }

    /// Forget the sink if it is `fd`. Returns whether it was.
    pub fn clear_if(&self, fd: RawFd) -> bool {
        fd >= 0
            && self
                .fd
                .compare_exchange(fd, EMPTY, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
    }
}

impl Default for SinkSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_starts_empty() {
        let slot = SinkSlot::new();
        assert_eq!(slot.get(), None);
        assert!(!slot.is_sink(3));
    }

    #[test]
    fn test_last_set_wins() {
        let slot = SinkSlot::new();
        slot.set(3);
        slot.set(4);
        assert_eq!(slot.get(), Some(4));
        assert!(slot.is_sink(4));
        assert!(!slot.is_sink(3));
    }

    #[test]
    fn test_clear_only_matching_descriptor() {
        let slot = SinkSlot::new();
        slot.set(5);
        assert!(!slot.clear_if(6));
        assert_eq!(slot.get(), Some(5));
        assert!(slot.clear_if(5));
        assert_eq!(slot.get(), None);
    }

    /// A failed `fileno` reports -1, which must never look like the sink.
    #[test]
    fn test_negative_descriptors_are_never_the_sink() {
        let slot = SinkSlot::new();
        assert!(!slot.is_sink(-1));
        assert!(!slot.clear_if(-1));
    }

    /// Threads setting and checking the slot at the same time only ever see
    /// a descriptor one of them stored, and the last store is kept.
    #[test]
    fn test_concurrent_updates() {
        let slot = SinkSlot::default();
        let written: Vec<RawFd> = (3..11).collect();

        thread::scope(|scope| {
            for &fd in &written {
                let slot = &slot;
                let written = &written;
                scope.spawn(move || {
                    for _ in 0..1000 {
                        slot.set(fd);
                        if let Some(seen) = slot.get() {
                            assert!(written.contains(&seen));
                        }
                        slot.is_sink(fd);
                        slot.clear_if(fd + 100);
                    }
                });
            }
        });

        assert!(written.contains(&slot.get().unwrap()));
    }
}
