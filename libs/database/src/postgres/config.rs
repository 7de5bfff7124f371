use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or, env_required};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIN_CONNECTIONS: u32 = 2;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;
const DEFAULT_MAX_LIFETIME_SECS: u64 = 30 * 60;

/// PostgreSQL connection pool configuration.
///
/// Construct it manually or load it from environment variables (with the `config` feature),
/// then hand it to [`super::connect_from_config`].
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    /// Database connection URL (required)
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections kept open
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Pool checkout timeout in seconds
    pub acquire_timeout_secs: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout_secs: u64,

    /// Connection max lifetime in seconds
    pub max_lifetime_secs: u64,

    /// Enable SQL statement logging
    pub sqlx_logging: bool,

    /// SQL logging level
    pub sqlx_logging_level: LevelFilter,
}

impl PostgresConfig {
    /// Create a config with default pool settings.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Convert this config into SeaORM ConnectOptions
    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(&self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(self.max_lifetime_secs))
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(self.sqlx_logging_level);
        opt
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The connection URL with any password replaced, safe for logs.
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        match rest.split_once('@') {
            Some((credentials, host)) => {
                let user = credentials.split(':').next().unwrap_or_default();
                format!("{scheme}://{user}:***@{host}")
            }
            None => self.url.clone(),
        }
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            max_lifetime_secs: DEFAULT_MAX_LIFETIME_SECS,
            sqlx_logging: true,
            sqlx_logging_level: LevelFilter::Debug,
        }
    }
}

/// Load PostgresConfig from environment variables
///
/// - `DATABASE_URL` (required)
/// - `DB_MAX_CONNECTIONS` (default: 10)
/// - `DB_MIN_CONNECTIONS` (default: 2)
/// - `DB_CONNECT_TIMEOUT_SECS` (default: 10)
/// - `DB_ACQUIRE_TIMEOUT_SECS` (default: 10)
/// - `DB_IDLE_TIMEOUT_SECS` (default: 600)
/// - `DB_MAX_LIFETIME_SECS` (default: 1800)
/// - `DB_SQLX_LOGGING` (default: true)
#[cfg(feature = "config")]
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required("DATABASE_URL")?;

        let max_connections = env_parse_or("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let min_connections = env_parse_or("DB_MIN_CONNECTIONS", DEFAULT_MIN_CONNECTIONS)?;
        if min_connections > max_connections {
            return Err(ConfigError::ParseError {
                key: "DB_MIN_CONNECTIONS".to_string(),
                details: format!(
                    "min connections ({min_connections}) exceeds max connections ({max_connections})"
                ),
            });
        }

        Ok(Self {
            url,
            max_connections,
            min_connections,
            connect_timeout_secs: env_parse_or("DB_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
            acquire_timeout_secs: env_parse_or("DB_ACQUIRE_TIMEOUT_SECS", DEFAULT_ACQUIRE_TIMEOUT_SECS)?,
            idle_timeout_secs: env_parse_or("DB_IDLE_TIMEOUT_SECS", DEFAULT_IDLE_TIMEOUT_SECS)?,
            max_lifetime_secs: env_parse_or("DB_MAX_LIFETIME_SECS", DEFAULT_MAX_LIFETIME_SECS)?,
            sqlx_logging: env_parse_or("DB_SQLX_LOGGING", true)?,
            sqlx_logging_level: LevelFilter::Debug,
        })
    }
}
