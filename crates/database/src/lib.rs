use std::{fmt, time::Duration};

use log::info;
use sqlx::{
    migrate::MigrateError,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use spots::database::Database;
use utility::env::{self, EnvError};

pub mod data_model;
pub mod queries;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

pub struct DatabaseConnectionInfo {
    pub username: String,
    pub password: String,
    pub hostname: String,
    pub port: u16,
    pub database: String,
    pub max_connections: u32,
}

impl DatabaseConnectionInfo {
    pub fn from_env() -> Result<Self, EnvError> {
        let username = env::required("DATABASE_USER")?;
        let password = env::required("DATABASE_PASSWORD")?;
        let hostname = env::required("DATABASE_HOST")?;
        let port: u16 = env::required_parsed("DATABASE_PORT")?;
        let database = env::required("DATABASE_NAME")?;
        let max_connections =
            env::optional_parsed("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        Ok(Self {
            username,
            password,
            hostname,
            port,
            database,
            max_connections,
        })
    }

    pub(crate) fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.hostname)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database)
    }
}

impl fmt::Debug for DatabaseConnectionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConnectionInfo")
            .field("username", &self.username)
            .field("password", &"***")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

#[derive(Clone)]
pub struct PgDatabase {
    connection: sqlx::PgPool,
}

pub struct PgDatabaseAutocommit {
    pool: sqlx::PgPool,
}

impl PgDatabase {
    /// Creates the pool without connecting. Connections are opened on first
    /// use, so an unreachable database surfaces as a per-request error
    /// instead of preventing startup.
    pub fn connect_lazy(
        database_connection_info: &DatabaseConnectionInfo,
        acquire_timeout: Duration,
    ) -> Self {
        info!(
            "using database {} at {}:{} (max {} connections)",
            database_connection_info.database,
            database_connection_info.hostname,
            database_connection_info.port,
            database_connection_info.max_connections
        );
        let pool = PgPoolOptions::new()
            .max_connections(database_connection_info.max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_lazy_with(database_connection_info.connect_options());

        Self { connection: pool }
    }

    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations").run(&self.connection).await
    }
}

impl Database for PgDatabase {
    type Autocommit = PgDatabaseAutocommit;

    fn auto(&self) -> Self::Autocommit {
        PgDatabaseAutocommit {
            pool: self.connection.clone(),
        }
    }
}
