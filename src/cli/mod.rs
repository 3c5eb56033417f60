//! CLI module
//!
//! Parses arguments, assembles the server configuration, and enters the
//! serving loop. All subsystem construction happens behind
//! `HttpServer::new`; nothing here touches stores directly.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::http_server::{HttpServer, ServerConfig};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Server error: {0}")]
    Server(String),
}

#[derive(Debug, Parser)]
#[command(name = "papervault", about = "A self-hostable archive for moderated exam paper sharing")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind to
        #[arg(long, default_value_t = 8080)]
        port: u16,

        /// Directory holding the blob store
        #[arg(long, default_value = "./papervault-data")]
        data_dir: PathBuf,

        /// Public URL under which blob locators are issued
        #[arg(long, default_value = "http://localhost:8080/files")]
        public_url: String,

        /// Secret for Bearer token validation
        #[arg(long, default_value = "CHANGE_THIS_SECRET_IN_PRODUCTION")]
        jwt_secret: String,

        /// CORS allowed origins (repeatable; empty = permissive)
        #[arg(long)]
        cors_origin: Vec<String>,
    },
}

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            host,
            port,
            data_dir,
            public_url,
            jwt_secret,
            cors_origin,
        } => {
            let config = ServerConfig {
                host,
                port,
                cors_origins: cors_origin,
                data_dir,
                public_url,
                jwt_secret,
            };
            serve(config)
        }
    }
}

fn serve(config: ServerConfig) -> CliResult<()> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Runtime(e.to_string()))?;

    runtime
        .block_on(HttpServer::new(config).start())
        .map_err(|e| CliError::Server(e.to_string()))
}
