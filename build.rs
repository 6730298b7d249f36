// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: shim name
fn shim_arg() -> Arg {
    Arg::new("shim")
        .required(true)
        .value_parser(["gpgme-config", "gpg-error-config"])
        .help("Shim name")
}

/// Common argument: flags forwarded to the shim
fn shim_flags_arg() -> Arg {
    Arg::new("args")
        .num_args(0..)
        .trailing_var_arg(true)
        .allow_hyphen_values(true)
        .help("Flags passed to the shim")
}

fn build_cli() -> Command {
    Command::new("confshim")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Confshim Contributors")
        .about("Legacy *-config shims that delegate to pkg-config")
        .subcommand_required(true)
        .subcommand(
            Command::new("run")
                .about("Run a shim as if invoked under its own name")
                .disable_help_flag(true)
                .arg(shim_arg())
                .arg(shim_flags_arg()),
        )
        .subcommand(
            Command::new("explain")
                .about("Show the delegate invocations a shim would perform, without running them")
                .disable_help_flag(true)
                .arg(shim_arg())
                .arg(shim_flags_arg()),
        )
        .subcommand(Command::new("list").about("List shims and their flag mappings"))
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "elvish", "fish", "powershell", "zsh"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    // Generate main man page
    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("confshim.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
        return;
    }

    println!("cargo:warning=Man page generated at {}", man_path.display());
}
