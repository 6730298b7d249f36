// tests/gpg_error_config.rs

//! `gpg-error-config` end to end: one delegate call per flag, stop at the
//! first unknown one.

#![cfg(unix)]

mod common;

use common::{run_with_delegate, shim_command, stderr, stdout};
use std::fs;

const GPG_ERROR_CONFIG: &str = env!("CARGO_BIN_EXE_gpg-error-config");

#[test]
fn test_one_call_per_flag() {
    let output = run_with_delegate(GPG_ERROR_CONFIG, "echo", &["--cflags", "--libs", "--version"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "--cflags gpg-error\n--libs gpg-error\n--modversion gpg-error\n"
    );
}

#[test]
fn test_debug_logging_stays_off_stdout() {
    let (mut cmd, _config_home) = shim_command(GPG_ERROR_CONFIG);
    let output = cmd
        .env("CONFSHIM_LOG", "debug")
        .env("PKG_CONFIG", "echo")
        .args(["--cflags", "--version"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "--cflags gpg-error\n--modversion gpg-error\n");
    assert!(stderr(&output).contains("Calling delegate"));
}

#[test]
fn test_pkg_config_value_is_word_split() {
    let output = run_with_delegate(GPG_ERROR_CONFIG, "echo --static", &["--libs"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "--static --libs gpg-error\n");
}

#[test]
fn test_no_flags_no_calls() {
    let output = run_with_delegate(GPG_ERROR_CONFIG, "echo", &[]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_output_before_unknown_option() {
    // one file for both streams keeps the relative order observable
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("combined.log");
    let log = fs::File::create(&log_path).unwrap();

    let (mut cmd, _config_home) = shim_command(GPG_ERROR_CONFIG);
    let status = cmd
        .env("PKG_CONFIG", "echo")
        .args(["--cflags", "--bogus", "--libs"])
        .stdout(log.try_clone().unwrap())
        .stderr(log)
        .status()
        .unwrap();

    assert_eq!(status.code(), Some(1));
    assert_eq!(
        fs::read_to_string(&log_path).unwrap(),
        "--cflags gpg-error\nUnknown option: --bogus\n"
    );
}

#[test]
fn test_unknown_option_first() {
    let output = run_with_delegate(GPG_ERROR_CONFIG, "echo", &["--unknown", "--cflags"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert_eq!(stderr(&output), "Unknown option: --unknown\n");
}

#[test]
fn test_gpgme_only_flags_rejected() {
    for flag in ["--prefix", "--modversion", "--thread=pthread"] {
        let output = run_with_delegate(GPG_ERROR_CONFIG, "echo", &[flag]);
        assert_eq!(output.status.code(), Some(1), "flag {}", flag);
        assert_eq!(stderr(&output), format!("Unknown option: {}\n", flag));
    }
}

#[test]
fn test_failing_delegate_does_not_stop_scan() {
    let output = run_with_delegate(GPG_ERROR_CONFIG, "false", &["--cflags", "--libs"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).is_empty());
}

#[test]
fn test_missing_delegate() {
    let output = run_with_delegate(GPG_ERROR_CONFIG, "confshim-missing-delegate", &["--cflags"]);
    assert_eq!(output.status.code(), Some(127));
    assert!(stderr(&output).contains("delegate 'confshim-missing-delegate' not found"));
}
