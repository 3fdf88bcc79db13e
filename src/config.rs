//! Process configuration from the environment (`.env` is loaded by `main` via dotenvy).

use crate::error::ConfigError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://local.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite URL. The file is created if missing.
    pub database_url: String,
    pub bind_addr: String,
    /// Upper bound on simultaneously open connections.
    pub max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: DEFAULT_DATABASE_URL.into(),
            bind_addr: DEFAULT_BIND_ADDR.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl AppConfig {
    /// Reads `DATABASE_URL`, `BIND_ADDR` and `DB_MAX_CONNECTIONS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Load(format!(
                        "DB_MAX_CONNECTIONS must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => defaults.max_connections,
        };
        Ok(AppConfig {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            max_connections,
        })
    }
}
