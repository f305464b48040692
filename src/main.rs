//! restservice entry point
//!
//! Parses arguments and dispatches to the CLI module. Errors are printed to
//! stderr and the process exits non-zero.

use restservice::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
