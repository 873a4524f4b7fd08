//! Grove - a package group catalog browser
//!
//! Main entry point wiring the CLI surface to the core catalog and
//! selection engine.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod group_cli;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "grove",
    about = "Package group catalog browser",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Set log level
    #[clap(long, default_value = "info", global = true)]
    log_level: LogLevel,

    /// Override grove directory discovery
    #[clap(long, global = true)]
    grove_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Command {
    /// List groups in the catalog
    List {
        /// Glob patterns matched against group ids and display names
        patterns: Vec<String>,

        /// Show only groups that are not installed
        #[clap(long, conflicts_with = "installed")]
        available: bool,

        /// Show only installed groups
        #[clap(long)]
        installed: bool,

        /// Include hidden groups when listing without patterns
        #[clap(long)]
        hidden: bool,

        /// Output results as JSON
        #[clap(long)]
        json: bool,
    },

    /// Show detailed information about groups
    Info {
        /// Glob patterns matched against group ids and display names
        patterns: Vec<String>,

        /// Show only groups that are not installed
        #[clap(long, conflicts_with = "installed")]
        available: bool,

        /// Show only installed groups
        #[clap(long)]
        installed: bool,

        /// Include hidden groups when listing without patterns
        #[clap(long)]
        hidden: bool,

        /// Output results as JSON
        #[clap(long)]
        json: bool,
    },

    /// Mark groups installed or removed
    Mark {
        #[clap(subcommand)]
        command: group_cli::MarkCommand,
    },

    /// Initialize a grove directory with a starter catalog
    Init,
}

/// Initialize tracing with CLI flags
///
/// Logs go to stderr so stdout stays clean for command output.
fn initialize_tracing(log_level: &LogLevel) {
    let filter = EnvFilter::new(log_level.to_filter_directive());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    match cli.command {
        Command::List {
            patterns,
            available,
            installed,
            hidden,
            json,
        } => group_cli::execute_list(
            cli.grove_dir.as_deref(),
            patterns,
            available,
            installed,
            hidden,
            json,
        ),
        Command::Info {
            patterns,
            available,
            installed,
            hidden,
            json,
        } => group_cli::execute_info(
            cli.grove_dir.as_deref(),
            patterns,
            available,
            installed,
            hidden,
            json,
        ),
        Command::Mark { command } => command.execute(cli.grove_dir.as_deref()),
        Command::Init => group_cli::execute_init(cli.grove_dir.as_deref()),
    }
}
