// src/main.rs

use anyhow::Result;
use clap::Parser;
use confshim::ShimKind;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    confshim::logging::init();

    // Multi-call: installed as a symlink named after a shim
    let mut args = std::env::args_os();
    if let Some(kind) = args
        .next()
        .and_then(|argv0| argv0.to_str().and_then(ShimKind::from_program_name))
    {
        let tokens = confshim::launch::tokens(args);
        std::process::exit(confshim::launch::run_shim(kind, &tokens));
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { shim, args } => std::process::exit(commands::cmd_run(shim, &args)),
        Commands::Explain { shim, args } => {
            let code = commands::cmd_explain(shim, &args)?;
            std::process::exit(code)
        }
        Commands::List => commands::cmd_list(),
        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}
