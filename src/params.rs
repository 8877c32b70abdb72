//! Parameters fixed at compile time (see `build.rs`).

use interposer::{Error, Suffix};

/// Path suffix of the log file to redirect.
///
/// It is compared byte by byte against the end of every path given to the
/// hooked functions, as the host passed it: a relative path in the host is
/// matched as that same relative text, with no resolution against the working
/// directory.
pub const PATH_SUFFIX: &str = env!("FLASHLOG_PATH_SUFFIX");

pub fn suffix() -> Result<Suffix, Error> {
    Suffix::new(PATH_SUFFIX)
}
