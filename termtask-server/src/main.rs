//! `TermTask` task service — HTTP backend for remote sessions.
//!
//! Serves the task CRUD endpoints, the `/chat` command endpoint, and a
//! server-rendered task page. Configuration via CLI flags, environment
//! variables, or config file (`~/.config/termtask-server/config.toml`).
//!
//! ```bash
//! # Run on default address 0.0.0.0:8080
//! cargo run --bin termtask-server
//!
//! # Run on custom address
//! cargo run --bin termtask-server -- --bind 127.0.0.1:3000
//!
//! # Or via environment variable
//! TERMTASK_SERVER_ADDR=127.0.0.1:3000 cargo run --bin termtask-server
//! ```

use std::sync::Arc;

use clap::Parser;
use termtask_server::config::{ServerCliArgs, ServerConfig};
use termtask_server::service::{self, ServiceState};

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, "starting termtask task service");

    let state = Arc::new(ServiceState::new());

    match service::start_server_with_state(&config.bind_addr, state).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "task service listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "task service task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start task service");
            std::process::exit(1);
        }
    }
}
