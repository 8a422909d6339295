//! stratadb CLI entry point
//!
//! A minimal entrypoint that parses arguments, dispatches to the CLI
//! module, and exits non-zero on failure. Configuration loading, store
//! construction, and server startup all live in `cli`.

use stratadb::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
