//! Core logic of the log redirect hook, independent of how the hook is linked
//! into the host process.
//!
//! The exported `extern "C"` entry points live in the `flashlog-redirect`
//! crate. They only translate raw calls into calls on an [`Interposer`], which
//! decides for each call whether to substitute the discard destination, to
//! redirect a write to standard output, or to delegate to the [`Genuine`]
//! implementation.
//!
//! Everything here can be exercised without preloading anything: the genuine
//! operations are a trait, and the sink handle reference is a plain value
//! owned by each [`Interposer`].

mod genuine;
mod interposer;
mod matcher;
mod slot;

pub use genuine::Genuine;
pub use interposer::{Interposer, DISCARD_PATH};
pub use matcher::{ends_with, Match, Suffix};
pub use slot::SinkSlot;

/// Path suffix that identifies the log file written by the Flash Player
/// runtime. It is used unless a different one is given at build time.
pub const DEFAULT_SUFFIX: &str = ".macromedia/Flash_Player/Logs/flashlog.txt";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("unable to find the next definition of `{0}`")]
    SymbolNotFound(String),

    #[error("the path suffix must not be empty")]
    EmptySuffix,

    #[error("the path suffix must not contain a NUL byte (found at offset {0})")]
    SuffixContainsNul(usize),
}
