// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{CommandFactory, Parser, ValueEnum};

/// Command-line arguments for `buildwatch`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "buildwatch",
    version,
    about = "Watch a file or directory and build it on every change.",
    after_help = concat!(
        "Examples:\n",
        "  buildwatch hello.go          # rebuild hello.go whenever it changes\n",
        "  buildwatch -r hello.go       # also run it after each clean build\n",
        "  buildwatch -t -i 2 ./pkg     # build and test ./pkg, polling every 2s",
    ),
    long_about = None
)]
pub struct CliArgs {
    /// File or directory to watch.
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,

    /// Run the target once after a build without errors.
    #[arg(short = 'r', long)]
    pub run: bool,

    /// Execute tests once after a build without errors.
    #[arg(short = 't', long)]
    pub test: bool,

    /// Fairly silent narration: only mark detected changes.
    #[arg(short = 's', long, visible_alias = "silent")]
    pub quiet: bool,

    /// Polling interval in seconds (default 1).
    #[arg(short = 'i', long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// External tool invoked as `<TOOL> <verb> <TARGET>` (default `go`).
    #[arg(long, value_name = "PROGRAM")]
    pub tool: Option<String>,

    /// Source file extension to watch in directory mode; repeatable
    /// (default `go`).
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Also count a non-zero exit code of the tool as a failure.
    #[arg(long)]
    pub strict_exit_status: bool,

    /// Path to a TOML config file.
    ///
    /// Default: `Buildwatch.toml` in the current directory, if it exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BUILDWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
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

/// Print the generated usage text to stdout.
pub fn print_usage() {
    let mut cmd = CliArgs::command();
    if let Err(e) = cmd.print_help() {
        eprintln!("failed to print usage: {e}");
    }
    println!();
}
