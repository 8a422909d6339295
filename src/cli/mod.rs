//! stratadb CLI
//!
//! Owns argument parsing, configuration loading, store construction,
//! and server startup. `main` only calls `run` and maps the error to a
//! non-zero exit.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::index::InMemoryIndex;
use crate::observability::{Event, Logger};
use crate::rest_api::RestServer;
use crate::store::DocumentStore;

/// CLI failures
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Runtime or server failure
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "stratadb", about = "A versioned document store with git-like named states")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Parse arguments and dispatch.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve { config, port } => serve(config, port),
    }
}

fn serve(config_path: Option<PathBuf>, port: Option<u16>) -> Result<(), CliError> {
    Logger::info(Event::BootStart, &[]);

    let mut config = match &config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(port) = port {
        config.http.port = port;
    }
    Logger::info(
        Event::ConfigLoaded,
        &[
            ("addr", &config.http.socket_addr()),
            (
                "source",
                config_path
                    .as_deref()
                    .and_then(|p| p.to_str())
                    .unwrap_or("defaults"),
            ),
        ],
    );

    // The in-memory index stands in for an external search service
    let index = Arc::new(InMemoryIndex::new());
    let store = Arc::new(DocumentStore::new(config.store, index));
    let server = RestServer::new(store, config.http);

    let runtime = tokio::runtime::Runtime::new()?;
    Logger::info(Event::BootComplete, &[]);
    runtime.block_on(server.start())?;
    Ok(())
}
