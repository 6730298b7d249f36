// tests/common/mod.rs

//! Shared helpers for driving the shim binaries in integration tests.
//!
//! Each command runs with an isolated config directory and no inherited
//! confshim environment, so a developer's own config cannot leak in.

#![allow(dead_code)]

use std::process::{Command, Output};
use tempfile::TempDir;

/// Command for a built binary with a clean environment.
///
/// Returns the TempDir used as config home - keep it alive until the
/// command has run.
pub fn shim_command(binary: &str) -> (Command, TempDir) {
    let config_home = tempfile::tempdir().unwrap();

    let mut cmd = Command::new(binary);
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("CONFSHIM_CONFIG")
        .env_remove("CONFSHIM_LOG")
        .env_remove("PKG_CONFIG");

    (cmd, config_home)
}

/// Run a binary with `delegate` standing in for pkg-config.
pub fn run_with_delegate(binary: &str, delegate: &str, args: &[&str]) -> Output {
    let (mut cmd, _config_home) = shim_command(binary);
    cmd.env("PKG_CONFIG", delegate).args(args).output().unwrap()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}
