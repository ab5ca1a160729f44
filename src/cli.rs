// src/cli.rs

//! CLI argument parsing using `clap`.

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::exec::duration::parse_duration;

/// Command-line arguments for `raptor`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "raptor",
    about = "Raptor CLI: development server with hot reload.",
    long_about = None
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RAPTOR_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start the development server with hot reload.
    Dev(DevArgs),
    /// Print the version number of Raptor CLI.
    Version,
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct DevArgs {
    /// How long to wait for the app to exit after an interrupt before it is
    /// killed (e.g. "3s", "500ms"). Waits indefinitely when omitted.
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub stop_grace: Option<Duration>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

/// Version line printed by `raptor version`.
pub fn version_line() -> String {
    format!("Raptor CLI v{}", env!("CARGO_PKG_VERSION"))
}
