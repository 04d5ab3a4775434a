use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_WATCH_INTERVAL_SECS;

#[derive(Debug, Parser)]
#[command(name = "toolsentry")]
#[command(version, about = "Check and install updates for command-line security tools")]
pub struct Cli {
    /// Path to the JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare installed versions against the latest releases
    Check {
        /// Tools to check (default: all configured tools)
        tools: Vec<String>,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check, then install updates for stale tools
    Update {
        /// Tools to update (default: all configured tools)
        tools: Vec<String>,

        /// Run the installer even when no update is needed
        #[arg(long)]
        force: bool,

        /// Print outcomes as JSON
        #[arg(long)]
        json: bool,
    },
    /// List configured tools and where their releases come from
    List,
    /// Re-check periodically until interrupted
    Watch {
        /// Tools to watch (default: all configured tools)
        tools: Vec<String>,

        /// Seconds between checks
        #[arg(long, default_value_t = DEFAULT_WATCH_INTERVAL_SECS)]
        interval: u64,
    },
}
