// src/error.rs

//! Error types for shim configuration and delegate execution
//!
//! An unrecognized command-line flag is not an error in this sense: it is an
//! ordinary [`ShimOutcome`](crate::shim::ShimOutcome) with a fixed message and
//! status. The variants here cover everything that stops a shim before or
//! while it talks to the delegate tool.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or running a shim
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file could not be read, parsed, or validated
    #[error("Invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Delegate program is not on PATH
    #[error("delegate '{program}' not found")]
    DelegateNotFound { program: String },

    /// Delegate program exists but could not be started
    #[error("failed to run delegate '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// No shim is registered under this name
    #[error("unknown shim '{0}'")]
    UnknownShim(String),

    /// I/O error writing diagnostics
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit status reported for this error
    ///
    /// Missing and non-executable delegates follow the shell's 127/126
    /// convention so callers see the same status an `exec` would produce.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::DelegateNotFound { .. } => 127,
            Self::Spawn { .. } => 126,
            Self::UnknownShim(_) | Self::Io(_) => 1,
        }
    }
}
