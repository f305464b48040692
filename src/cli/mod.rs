//! CLI module for restservice
//!
//! Provides command-line interface for:
//! - init: Write a default configuration file
//! - serve: Start the HTTP server
//! - aggregate: Print the teacher directory once and exit

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{aggregate, build_state, init, run, run_command, serve};
pub use config::{Config, ContentConfig, StoreBackend, StoreConfig};
pub use errors::{CliError, CliErrorCode, CliResult};
