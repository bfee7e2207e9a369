use std::env;
use std::time::Duration;

use crate::error::{Result, ServiceError};

// Environment variable names shared by both Lambdas
pub const ENV_SECRET_ARN: &str = "DB_SECRET_ARN";
pub const ENV_DB_HOST: &str = "DB_HOST";
pub const ENV_DB_PORT: &str = "DB_PORT";
pub const ENV_DB_NAME: &str = "DB_NAME";
pub const ENV_CONNECT_TIMEOUT: &str = "DB_CONNECT_TIMEOUT";
pub const ENV_ENABLE_RLS: &str = "ENABLE_RLS";

const DEFAULT_PORT: u16 = 5432;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Static connection settings for the users database. Read from the
/// environment once per invocation; nothing is cached across invocations.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub secret_id: String,
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub connect_timeout: Duration,
}

impl DbConfig {
    /// Loads and validates the configuration. Fails before any network call
    /// if a required setting is missing or out of range.
    pub fn from_env() -> Result<Self> {
        let secret_id = require_var(ENV_SECRET_ARN)?;
        let host = require_var(ENV_DB_HOST)?;
        let dbname = require_var(ENV_DB_NAME)?;

        let port = match env::var(ENV_DB_PORT) {
            Ok(raw) => raw.trim().parse::<u16>().ok().filter(|p| *p > 0).ok_or_else(|| {
                ServiceError::Configuration(format!(
                    "{} must be an integer in 1-65535, got '{}'",
                    ENV_DB_PORT, raw
                ))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let connect_timeout = env::var(ENV_CONNECT_TIMEOUT)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

        Ok(DbConfig {
            secret_id,
            host,
            port,
            dbname,
            connect_timeout,
        })
    }
}

/// Whether the schema initializer should also set up row-level security.
pub fn rls_enabled() -> bool {
    env::var(ENV_ENABLE_RLS)
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false)
}

fn require_var(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ServiceError::Configuration(format!(
            "missing required environment variable {}",
            name
        ))),
    }
}
