use core_config::{FromEnv, env_parse_or, server::ServerConfig};
use database::postgres::PostgresConfig;
use std::time::Duration;

pub use core_config::Environment;

const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Application configuration, composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if DATABASE_URL is not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let shutdown_timeout = Duration::from_secs(env_parse_or(
            "SHUTDOWN_TIMEOUT_SECS",
            DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        )?);

        Ok(Self {
            database,
            server,
            environment,
            shutdown_timeout,
        })
    }
}
