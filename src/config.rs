//! Runtime configuration.
//!
//! Everything is read from the environment once at startup:
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `ROSTER_ADDR` | `0.0.0.0:5000` | Socket address to listen on |
//! | `ROSTER_SHUTDOWN_TIMEOUT_SECS` | `5` | How long shutdown waits for in-flight requests |
//! | `RUST_LOG` | `info` | `tracing` filter directive |

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::Error;

pub const ADDR_VAR: &str = "ROSTER_ADDR";
pub const SHUTDOWN_TIMEOUT_VAR: &str = "ROSTER_SHUTDOWN_TIMEOUT_SECS";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

const DEFAULT_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_LOG_FILTER: &str = "info";

/// Service configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub shutdown_timeout: Duration,
    pub log_filter: String,
}

impl Config {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    ///
    /// Unset and empty variables fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr = get(ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_ADDR.to_owned())
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| Error::Config { key: ADDR_VAR, reason: e.to_string() })?;

        let shutdown_timeout = match get(SHUTDOWN_TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| Error::Config { key: SHUTDOWN_TIMEOUT_VAR, reason: e.to_string() })?,
            None => DEFAULT_SHUTDOWN_TIMEOUT,
        };

        let log_filter = get(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());

        Ok(Self { addr, shutdown_timeout, log_filter })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}
