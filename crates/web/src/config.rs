use std::{net::SocketAddr, time::Duration};

use database::DatabaseConnectionInfo;
use utility::env::{self, EnvError};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 10;

/// Process configuration, read once at startup.
#[derive(Debug)]
pub struct Config {
    pub listen_address: SocketAddr,
    /// Upper bound for a single store query, including waiting for a pooled
    /// connection.
    pub query_timeout: Duration,
    pub run_migrations: bool,
    pub database: DatabaseConnectionInfo,
}

impl Config {
    pub fn from_env() -> Result<Self, EnvError> {
        let listen_address = env::optional_parsed(
            "LISTEN_ADDRESS",
            SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
        )?;
        let query_timeout = query_timeout(env::optional_parsed(
            "QUERY_TIMEOUT_SECS",
            DEFAULT_QUERY_TIMEOUT_SECS,
        )?)?;
        let run_migrations = env::optional_parsed("RUN_MIGRATIONS", false)?;
        let database = DatabaseConnectionInfo::from_env()?;

        Ok(Self {
            listen_address,
            query_timeout,
            run_migrations,
            database,
        })
    }

    /// Waiting for a pooled connection gives up well before the query timeout,
    /// so an unreachable store is reported as unavailable rather than slow.
    pub fn acquire_timeout(&self) -> Duration {
        self.query_timeout / 2
    }
}

// A zero timeout would fail every request with a timeout.
fn query_timeout(secs: u64) -> Result<Duration, EnvError> {
    if secs == 0 {
        return Err(EnvError::Invalid {
            name: "QUERY_TIMEOUT_SECS",
            value: secs.to_string(),
            reason: "must be at least one second".to_owned(),
        });
    }
    Ok(Duration::from_secs(secs))
}
