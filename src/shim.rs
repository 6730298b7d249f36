// src/shim.rs

//! Legacy `*-config` shims
//!
//! Each shim presents the flag vocabulary of an old `<library>-config`
//! script and translates it into delegate tool queries for one package.
//! Shims differ in how they dispatch:
//!
//! - **Accumulate** (`gpgme-config`): validate every token first, then
//!   replace the process with a single delegate invocation carrying all
//!   translated flags. Nothing is emitted if any token is unknown.
//! - **Interleave** (`gpg-error-config`): one delegate call per recognized
//!   token, made as the token is scanned. Scanning stops at the first
//!   unknown token, after earlier calls have already printed their output.
//!
//! The two strategies have different observable failure behaviour, so they
//! are kept as separate code paths.

use crate::config::Config;
use crate::delegate::{Delegate, Invocation};
use crate::flags::{FlagTable, GPG_ERROR_RULES, GPGME_RULES};
use crate::error::Result;
use std::io::Write;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, info};

/// Built-in shims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter)]
pub enum ShimKind {
    #[strum(serialize = "gpgme-config")]
    GpgmeConfig,
    #[strum(serialize = "gpg-error-config")]
    GpgErrorConfig,
}

impl ShimKind {
    /// Static definition for this shim
    pub fn definition(self) -> &'static ShimDefinition {
        match self {
            Self::GpgmeConfig => &GPGME_CONFIG,
            Self::GpgErrorConfig => &GPG_ERROR_CONFIG,
        }
    }

    /// Identify a shim from the name a binary was invoked as
    ///
    /// Accepts full paths and a trailing `.exe`.
    pub fn from_program_name(argv0: &str) -> Option<Self> {
        let name = Path::new(argv0).file_name()?.to_str()?;
        let name = name.strip_suffix(".exe").unwrap_or(name);
        name.parse().ok()
    }
}

/// How a shim turns recognized flags into delegate calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DispatchStrategy {
    /// Validate all tokens, then one process-replacing invocation
    #[strum(serialize = "accumulate")]
    Accumulate,
    /// One synchronous invocation per token, abort on first unknown
    #[strum(serialize = "interleave")]
    Interleave,
}

/// Fixed description of a shim
#[derive(Debug)]
pub struct ShimDefinition {
    pub kind: ShimKind,
    /// Package queried when configuration does not override it
    pub default_package: &'static str,
    pub table: &'static FlagTable,
    pub strategy: DispatchStrategy,
    /// Leading text of the diagnostic for an unrecognized token
    pub reject_prefix: &'static str,
}

static GPGME_CONFIG: ShimDefinition = ShimDefinition {
    kind: ShimKind::GpgmeConfig,
    default_package: "gpgme",
    table: &GPGME_RULES,
    strategy: DispatchStrategy::Accumulate,
    reject_prefix: "Unknown flag",
};

static GPG_ERROR_CONFIG: ShimDefinition = ShimDefinition {
    kind: ShimKind::GpgErrorConfig,
    default_package: "gpg-error",
    table: &GPG_ERROR_RULES,
    strategy: DispatchStrategy::Interleave,
    reject_prefix: "Unknown option",
};

/// Result of running a shim to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShimOutcome {
    /// All tokens recognized; carries the status to exit with
    Completed(i32),
    /// Scanning stopped at an unrecognized token
    Rejected { token: String },
}

impl ShimOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Completed(code) => *code,
            Self::Rejected { .. } => 1,
        }
    }
}

/// A shim bound to a delegate program and package
#[derive(Debug, Clone)]
pub struct Shim {
    definition: &'static ShimDefinition,
    program: String,
    program_args: Vec<String>,
    package: String,
}

impl Shim {
    pub fn new(kind: ShimKind, program: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            definition: kind.definition(),
            program: program.into(),
            program_args: Vec::new(),
            package: package.into(),
        }
    }

    /// Arguments passed to the delegate ahead of the translated flags
    pub fn with_program_args(mut self, args: Vec<String>) -> Self {
        self.program_args = args;
        self
    }

    /// Bind a shim using the delegate and package from configuration
    pub fn from_config(kind: ShimKind, config: &Config) -> Self {
        Self::new(kind, config.program(), config.package(kind))
            .with_program_args(config.program_args().to_vec())
    }

    pub fn kind(&self) -> ShimKind {
        self.definition.kind
    }

    pub fn definition(&self) -> &'static ShimDefinition {
        self.definition
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Diagnostic printed for an unrecognized token
    pub fn rejection_message(&self, token: &str) -> String {
        format!("{}: {}", self.definition.reject_prefix, token)
    }

    /// Delegate invocation for a set of translated flags
    ///
    /// Delegate arguments from configuration come first and the package name
    /// always follows the flags.
    pub fn invocation<I, S>(&self, flags: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = self.program_args.clone();
        args.extend(flags.into_iter().map(Into::into));
        args.push(self.package.clone());
        Invocation::new(self.program.clone(), args)
    }

    /// Run the shim over `args`
    ///
    /// Rejection diagnostics are written to `stderr`; delegate output goes
    /// wherever the delegate writes it.
    pub fn run<D, W>(&self, args: &[String], delegate: &mut D, stderr: &mut W) -> Result<ShimOutcome>
    where
        D: Delegate + ?Sized,
        W: Write + ?Sized,
    {
        debug!(
            "Running {} ({} strategy) with {} argument(s)",
            self.kind(),
            self.definition.strategy,
            args.len()
        );

        match self.definition.strategy {
            DispatchStrategy::Accumulate => self.run_accumulate(args, delegate, stderr),
            DispatchStrategy::Interleave => self.run_interleave(args, delegate, stderr),
        }
    }

    fn run_accumulate<D, W>(&self, args: &[String], delegate: &mut D, stderr: &mut W) -> Result<ShimOutcome>
    where
        D: Delegate + ?Sized,
        W: Write + ?Sized,
    {
        let mut flags = Vec::with_capacity(args.len());

        for token in args {
            let Some(rule) = self.definition.table.classify(token) else {
                return self.reject(token, stderr);
            };
            debug!("{} -> {}", token, rule.action);
            flags.extend(rule.output());
        }

        let invocation = self.invocation(flags);
        info!("Delegating: {}", invocation);
        let code = delegate.replace(&invocation)?;
        Ok(ShimOutcome::Completed(code))
    }

    fn run_interleave<D, W>(&self, args: &[String], delegate: &mut D, stderr: &mut W) -> Result<ShimOutcome>
    where
        D: Delegate + ?Sized,
        W: Write + ?Sized,
    {
        let mut status = 0;

        for token in args {
            let Some(rule) = self.definition.table.classify(token) else {
                return self.reject(token, stderr);
            };
            debug!("{} -> {}", token, rule.action);

            if let Some(flag) = rule.output() {
                let invocation = self.invocation([flag]);
                info!("Delegating: {}", invocation);
                status = delegate.call(&invocation)?;
            }
        }

        Ok(ShimOutcome::Completed(status))
    }

    fn reject<W: Write + ?Sized>(&self, token: &str, stderr: &mut W) -> Result<ShimOutcome> {
        debug!("{} rejected token {:?}", self.kind(), token);
        writeln!(stderr, "{}", self.rejection_message(token))?;
        stderr.flush()?;
        Ok(ShimOutcome::Rejected {
            token: token.to_string(),
        })
    }
}
