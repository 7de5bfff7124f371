use crate::{env_or_default, env_parse_or, ConfigError, FromEnv};
use std::net::Ipv4Addr;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_READ_TIMEOUT_SECS: u64 = 10;
const DEFAULT_WRITE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 120;

/// Server configuration for HTTP APIs
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Budget for reading a request.
    pub read_timeout_secs: u64,
    /// Budget for producing a response; enforced per request.
    pub write_timeout_secs: u64,
    /// How long a keep-alive connection may sit idle.
    pub idle_timeout_secs: u64,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            ..Self::default()
        }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables with sensible defaults:
    /// - HOST: defaults to 0.0.0.0
    /// - PORT: defaults to 8080
    /// - SERVER_READ_TIMEOUT_SECS: defaults to 10
    /// - SERVER_WRITE_TIMEOUT_SECS: defaults to 10
    /// - SERVER_IDLE_TIMEOUT_SECS: defaults to 120
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_parse_or("PORT", DEFAULT_PORT)?;
        let read_timeout_secs = env_parse_or("SERVER_READ_TIMEOUT_SECS", DEFAULT_READ_TIMEOUT_SECS)?;
        let write_timeout_secs =
            env_parse_or("SERVER_WRITE_TIMEOUT_SECS", DEFAULT_WRITE_TIMEOUT_SECS)?;
        let idle_timeout_secs = env_parse_or("SERVER_IDLE_TIMEOUT_SECS", DEFAULT_IDLE_TIMEOUT_SECS)?;

        Ok(Self {
            host,
            port,
            read_timeout_secs,
            write_timeout_secs,
            idle_timeout_secs,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: DEFAULT_PORT,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
            write_timeout_secs: DEFAULT_WRITE_TIMEOUT_SECS,
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
        }
    }
}
