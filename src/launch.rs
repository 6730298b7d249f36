// src/launch.rs

//! Process entry for shim binaries
//!
//! Shared by the dedicated `gpgme-config` / `gpg-error-config` binaries and by
//! the multi-call `confshim` binary.

use crate::config::Config;
use crate::delegate::ProcessDelegate;
use crate::shim::{Shim, ShimKind};
use std::ffi::OsString;
use tracing::debug;

/// Convert raw process arguments to tokens
///
/// Tokens that are not valid UTF-8 can never match a rule, so a lossy
/// conversion only affects how they are echoed back in diagnostics.
pub fn tokens<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

/// Run a shim against the real environment and return the exit status
pub fn run_shim(kind: ShimKind, args: &[String]) -> i32 {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            debug!("Configuration error: {:?}", e);
            eprintln!("{}: {}", kind, e);
            return e.exit_code();
        }
    };

    let shim = Shim::from_config(kind, &config);
    let mut delegate = ProcessDelegate::new();
    let mut stderr = std::io::stderr().lock();

    match shim.run(args, &mut delegate, &mut stderr) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("{}: {}", kind, e);
            e.exit_code()
        }
    }
}

/// `main` body for a dedicated shim binary
pub fn shim_main(kind: ShimKind) -> ! {
    crate::logging::init();
    let args = tokens(std::env::args_os().skip(1));
    std::process::exit(run_shim(kind, &args))
}
