// src/lib.rs

//! Confshim
//!
//! Drop-in replacements for legacy `<library>-config` scripts that translate
//! their flags into `pkg-config` queries.
//!
//! # Architecture
//!
//! - Flag tables: static exact-match rules (pass through, rewrite, discard)
//! - Shims: a table, a package, and a dispatch strategy (accumulate or
//!   interleave)
//! - Delegates: the seam to the external query tool; real processes in the
//!   binaries, recorded invocations for dry runs and tests

pub mod config;
pub mod delegate;
mod error;
pub mod flags;
pub mod launch;
pub mod logging;
pub mod shim;

pub use config::Config;
pub use delegate::{CallMode, Delegate, Invocation, ProcessDelegate, RecordingDelegate};
pub use error::{Error, Result};
pub use flags::{FlagAction, FlagRule, FlagTable};
pub use shim::{DispatchStrategy, Shim, ShimDefinition, ShimKind, ShimOutcome};
