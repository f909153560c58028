//! json-echo: a local stand-in for a remote JSON echo endpoint
//!
//! Listens on the loopback interface and answers every HTTP POST with the
//! JSON value from its body, so client tests never reach a third-party
//! echo service.
//!
//! Features:
//! - `200` with the re-serialized value for valid JSON
//! - `400` with `{"error": "Invalid JSON: ..."}` otherwise
//! - One connection handled at a time on a single thread
//! - Clean exit on Ctrl+C or SIGTERM
//! - Port from the command line or a TOML file

mod config;
mod protocols;
mod server;

use config::Config;
use server::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run(config))
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let server = Server::bind(config.listen_addr())?;
    let addr = server.local_addr()?;

    info!(address = %addr, port = addr.port(), "Test server started");

    server.run(server::shutdown_signal()).await?;
    Ok(())
}
