// src/delegate.rs

//! Delegate tool invocation
//!
//! The shims never interpret package metadata themselves; they build an
//! [`Invocation`] of the delegate tool (normally `pkg-config`) and hand it to
//! a [`Delegate`]. Two execution modes exist:
//!
//! - `call` - run to completion with inherited stdio, return the exit code
//! - `replace` - hand the whole process over to the delegate (Unix `exec`)
//!
//! [`ProcessDelegate`] is the real implementation; tests substitute a
//! recording delegate.

use crate::error::{Error, Result};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Default delegate program
pub const DEFAULT_PROGRAM: &str = "pkg-config";

/// A single delegated command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Executes delegated invocations
pub trait Delegate {
    /// Run the invocation to completion and return its exit code
    fn call(&mut self, invocation: &Invocation) -> Result<i32>;

    /// Replace the current process with the invocation
    ///
    /// Implementations that cannot replace the process run it to completion
    /// and return its exit code instead.
    fn replace(&mut self, invocation: &Invocation) -> Result<i32>;
}

/// Delegate backed by real child processes
#[derive(Debug, Default)]
pub struct ProcessDelegate;

impl ProcessDelegate {
    pub fn new() -> Self {
        Self
    }

    fn command(&self, invocation: &Invocation) -> Result<Command> {
        let path = resolve_program(invocation.program())?;
        debug!("Resolved delegate {} -> {}", invocation.program(), path.display());

        let mut cmd = Command::new(path);
        cmd.args(invocation.args());
        Ok(cmd)
    }
}

impl Delegate for ProcessDelegate {
    fn call(&mut self, invocation: &Invocation) -> Result<i32> {
        debug!("Calling delegate: {}", invocation);
        let status = self
            .command(invocation)?
            .status()
            .map_err(|e| spawn_error(invocation.program(), e))?;
        Ok(exit_code(status))
    }

    #[cfg(unix)]
    fn replace(&mut self, invocation: &Invocation) -> Result<i32> {
        use std::os::unix::process::CommandExt;

        debug!("Replacing process with delegate: {}", invocation);
        // exec only returns on failure
        let err = self.command(invocation)?.exec();
        Err(spawn_error(invocation.program(), err))
    }

    #[cfg(not(unix))]
    fn replace(&mut self, invocation: &Invocation) -> Result<i32> {
        self.call(invocation)
    }
}

/// How an invocation was handed to a [`Delegate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallMode {
    Call,
    Replace,
}

impl fmt::Display for CallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Replace => write!(f, "exec"),
        }
    }
}

/// Delegate that records invocations instead of running them
///
/// Used for dry runs (`confshim explain`) and in tests. Every invocation
/// reports `status` as its exit code.
#[derive(Debug, Default)]
pub struct RecordingDelegate {
    pub calls: Vec<(CallMode, Invocation)>,
    pub status: i32,
}

impl RecordingDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(status: i32) -> Self {
        Self {
            calls: Vec::new(),
            status,
        }
    }

    pub fn invocations(&self) -> impl Iterator<Item = &Invocation> {
        self.calls.iter().map(|(_, inv)| inv)
    }
}

impl Delegate for RecordingDelegate {
    fn call(&mut self, invocation: &Invocation) -> Result<i32> {
        self.calls.push((CallMode::Call, invocation.clone()));
        Ok(self.status)
    }

    fn replace(&mut self, invocation: &Invocation) -> Result<i32> {
        self.calls.push((CallMode::Replace, invocation.clone()));
        Ok(self.status)
    }
}

/// Locate the delegate program
///
/// Programs given with a directory component are used as-is; bare names are
/// searched for on `PATH`.
pub fn resolve_program(program: &str) -> Result<PathBuf> {
    let path = Path::new(program);
    if path.components().count() > 1 {
        return Ok(path.to_path_buf());
    }

    which::which(program).map_err(|_| Error::DelegateNotFound {
        program: program.to_string(),
    })
}

fn spawn_error(program: &str, source: std::io::Error) -> Error {
    if source.kind() == ErrorKind::NotFound {
        Error::DelegateNotFound {
            program: program.to_string(),
        }
    } else {
        Error::Spawn {
            program: program.to_string(),
            source,
        }
    }
}

/// Map a child's exit status to the status this process should report
#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .unwrap_or_else(|| 128 + status.signal().unwrap_or(0))
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
