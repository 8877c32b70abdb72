//! Fixes the path suffix of the redirected log file at compile time.
//!
//! The suffix defaults to the location of the Flash Player log
//! ([`interposer::DEFAULT_SUFFIX`]) and can be replaced by setting
//! `FLASHLOG_PATH_SUFFIX` when building. Nothing is read from the environment
//! once the library is loaded.
//!
//! The path of the produced shared object is also exported, so that the
//! integration tests can preload it.

use interposer::Suffix;
use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=FLASHLOG_PATH_SUFFIX");
    let suffix = match env::var("FLASHLOG_PATH_SUFFIX") {
        Ok(suffix) => suffix,
        Err(env::VarError::NotPresent) => interposer::DEFAULT_SUFFIX.to_owned(),
        Err(env::VarError::NotUnicode(_)) => {
            panic!("FLASHLOG_PATH_SUFFIX is not a valid UTF-8 string")
        }
    };
    if let Err(err) = Suffix::validate(&suffix) {
        panic!("invalid FLASHLOG_PATH_SUFFIX {suffix:?}: {err}");
    }
    println!("cargo:rustc-env=FLASHLOG_PATH_SUFFIX={}", suffix);

    let pkg_name = env::var("CARGO_PKG_NAME").unwrap().replace('-', "_");
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap();
    let dylib_path = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(&manifest_dir).join("target"))
        .join(profile)
        .join(format!("lib{pkg_name}.so"));
    println!("cargo:rustc-env=DYLIB_PATH={}", dylib_path.display());
}
