//! Command implementations.

use console::style;
use crossforge::{Environment, mingw};

use crate::cli::{ArchArg, Cli, Commands, EXIT_FAILURE, EXIT_SUCCESS};

/// Dispatch CLI command to the appropriate handler.
pub fn run_command(cli: &Cli) -> i32 {
    match &cli.command {
        Commands::Detect { arch } => cmd_detect(*arch),
        Commands::Env { arch } => cmd_env(*arch),
    }
}

fn base_env(arch: ArchArg) -> Environment {
    let mut env = Environment::new();
    env.set(mingw::TARGET_ARCH, arch.tag());
    env
}

fn cmd_detect(arch: ArchArg) -> i32 {
    let env = base_env(arch);

    match mingw::find(&env) {
        Some(prefix) => {
            let gcc = format!("{prefix}gcc");
            let location = env
                .where_is_anywhere(&gcc)
                .map_or_else(String::new, |p| format!(" ({})", p.display()));
            println!(
                "{} {} toolchain: {}{}",
                style("✓").green().bold(),
                arch.tag(),
                prefix,
                location
            );
            EXIT_SUCCESS
        }
        None => {
            eprintln!(
                "{} no cross toolchain found for {}",
                style("✗").red().bold(),
                arch.tag()
            );
            EXIT_FAILURE
        }
    }
}

fn cmd_env(arch: ArchArg) -> i32 {
    let mut env = base_env(arch);
    mingw::generate(&mut env);

    let mut vars: Vec<(String, String)> = env
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    vars.sort();

    for (key, value) in vars {
        println!("{key} = {value}");
    }

    EXIT_SUCCESS
}
