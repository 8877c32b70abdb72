//! Global state managed by the hook.
//!
//! A single [`Interposer`] serves every hooked call of the process. It is
//! built when the library is loaded, before the host gets to call any hooked
//! function, and lives until the process exits.
//!
//! If a hook is reached earlier than that (from another library's
//! constructor, for instance) the state is built on the spot instead.

use crate::{functions::Functions, params};
use ctor::ctor;
use interposer::{Error, Interposer};
use once_cell::sync::Lazy;
use std::process;

static INTERPOSER: Lazy<Interposer<Functions>> = Lazy::new(|| match build() {
    Ok(interposer) => interposer,
    Err(err) => {
        // Carrying on without the original functions would crash on the
        // first call that needs them anyway.
        eprintln!("[flashlog] ERROR: {err}");
        process::abort()
    }
});

fn build() -> Result<Interposer<Functions>, Error> {
    Ok(Interposer::new(Functions::resolve()?, params::suffix()?))
}

/// Namespace for accessing the global state.
pub struct State;

impl State {
    pub fn interposer() -> &'static Interposer<Functions> {
        &INTERPOSER
    }
}

/// Library constructor.
#[ctor]
unsafe fn init() {
    #[cfg(feature = "trace")]
    init_tracing();
    Lazy::force(&INTERPOSER);
}

/// Trace every hooked call on stderr. The level is fixed: nothing is read from
/// the environment of the host.
#[cfg(feature = "trace")]
fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::TRACE)
        .with_target(false)
        .without_time()
        .try_init();
    if let Err(err) = installed {
        eprintln!("[flashlog] WARNING: unable to install the trace subscriber: {err}");
    }
}
