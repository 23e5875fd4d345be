//! Crossforge CLI - cross-MinGW environment configurator.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "crossforge=debug"
    } else if cli.silent {
        "crossforge=error"
    } else {
        "crossforge=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(default_level.parse().unwrap()),
        )
        .with_target(false)
        .init();

    std::process::exit(commands::run_command(&cli));
}
