//! roster entry point.
//!
//! Loads configuration from the environment, installs logging and serves
//! until SIGTERM or Ctrl-C.
//!
//! ```text
//! RUST_LOG=debug ROSTER_ADDR=127.0.0.1:5000 cargo run
//!
//! curl localhost:5000/ping
//! curl -X POST localhost:5000/students -d '{"name":"Alice","age":20}'
//! curl 'localhost:5000/students?id=1'
//! curl -X PUT 'localhost:5000/students?id=1' -d '{"name":"Alicia","age":21}'
//! curl -X DELETE 'localhost:5000/students?id=1'
//! ```

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use roster::students::StudentStore;
use roster::{Config, Server};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    init_logging(&config.log_filter);

    let store = Arc::new(StudentStore::new());
    let server = Server::bind(config.addr)
        .await?
        .shutdown_timeout(config.shutdown_timeout);

    info!(addr = %server.local_addr()?, "starting roster v{}", env!("CARGO_PKG_VERSION"));

    server.serve(roster::app(store)).await?;

    info!("server stopped gracefully");
    Ok(())
}

/// Installs the `fmt` subscriber. An unparsable filter falls back to `info`.
fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
