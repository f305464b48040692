//! CLI argument definitions using clap
//!
//! Commands:
//! - restservice init --config <path>
//! - restservice serve --config <path>
//! - restservice aggregate --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// restservice - key-value records and teacher directory over HTTP
#[derive(Parser, Debug)]
#[command(name = "restservice")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./restservice.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./restservice.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the aggregated teacher directory and exit
    Aggregate {
        /// Path to configuration file
        #[arg(long, default_value = "./restservice.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
