// src/commands.rs
//! Command handlers for the confshim CLI

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use confshim::{Config, RecordingDelegate, Shim, ShimKind};
use std::io::{self, Write};
use strum::IntoEnumIterator;
use tracing::info;

use crate::cli::Cli;

/// Run a shim for real; returns its exit status
pub fn cmd_run(kind: ShimKind, args: &[String]) -> i32 {
    info!("Running {} via confshim", kind);
    confshim::launch::run_shim(kind, args)
}

/// Print the invocations a shim would make
///
/// Mirrors the shim's exit status: 1 when a token is rejected, else 0.
pub fn cmd_explain(kind: ShimKind, args: &[String]) -> Result<i32> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("confshim: {}", e);
            return Ok(e.exit_code());
        }
    };
    let shim = Shim::from_config(kind, &config);
    let mut delegate = RecordingDelegate::new();
    let mut stderr = io::stderr().lock();

    let outcome = shim.run(args, &mut delegate, &mut stderr)?;

    let mut stdout = io::stdout().lock();
    for (mode, invocation) in &delegate.calls {
        writeln!(stdout, "{}: {}", mode, invocation)?;
    }

    Ok(outcome.exit_code())
}

/// List every shim with its strategy and flag table
pub fn cmd_list() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    println!("Delegate: {}", config.program());
    for kind in ShimKind::iter() {
        let def = kind.definition();
        println!();
        println!(
            "{} (package: {}, strategy: {})",
            kind,
            config.package(kind),
            def.strategy
        );
        for rule in def.table.rules() {
            println!("  {:<18} {}", rule.input, rule.action);
        }
        println!("  {:<18} reject with \"{}: <flag>\"", "*", def.reject_prefix);
    }

    Ok(())
}

/// Write a completion script to stdout
pub fn cmd_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "confshim", &mut io::stdout());
    Ok(())
}
