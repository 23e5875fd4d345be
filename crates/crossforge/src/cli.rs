//! CLI definitions and argument types.

use clap::{Parser, Subcommand, ValueEnum};

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "crossforge")]
#[command(about = "Cross-MinGW toolchain detection and build-environment configuration")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub silent: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe the search path for a cross toolchain
    Detect {
        /// Target machine architecture
        #[arg(long, value_enum, default_value = "x86")]
        arch: ArchArg,
    },
    /// Configure a full cross environment and dump its variables
    Env {
        /// Target machine architecture
        #[arg(long, value_enum, default_value = "x86")]
        arch: ArchArg,
    },
}

/// Target machine architecture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ArchArg {
    /// 32-bit Windows targets
    X86,
    /// 64-bit Windows targets
    #[value(name = "x86_64")]
    X64,
}

impl ArchArg {
    /// Machine tag as stored in the environment.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::X86 => "x86",
            Self::X64 => "x86_64",
        }
    }
}
