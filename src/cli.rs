// src/cli.rs
//! CLI definitions for the confshim umbrella binary
//!
//! This module contains the command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.
//!
//! The shims themselves never go through clap: their flag vocabulary and
//! rejection messages are fixed, so `run` and `explain` hand every token
//! after the shim name through untouched, `--help` and `-h` included.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use confshim::ShimKind;

#[derive(Parser)]
#[command(name = "confshim")]
#[command(author = "Confshim Contributors")]
#[command(version)]
#[command(about = "Legacy *-config shims that delegate to pkg-config", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a shim as if invoked under its own name
    #[command(disable_help_flag = true)]
    Run {
        /// Shim name (gpgme-config, gpg-error-config)
        #[arg(value_parser = parse_shim)]
        shim: ShimKind,

        /// Flags passed to the shim
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Show the delegate invocations a shim would perform, without running them
    #[command(disable_help_flag = true)]
    Explain {
        /// Shim name (gpgme-config, gpg-error-config)
        #[arg(value_parser = parse_shim)]
        shim: ShimKind,

        /// Flags passed to the shim
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List shims and their flag mappings
    List,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_shim(s: &str) -> Result<ShimKind, String> {
    s.parse().map_err(|_| format!("unknown shim '{}'", s))
}
