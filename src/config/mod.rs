use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; PageMetaBot/1.0)";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub fetch_timeout: Duration,
    pub max_body_bytes: usize,
    pub user_agent: String,
    pub is_production: bool,
}

impl Config {
    /// Load `.env` (if present) and read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup. Unset variables fall
    /// back to their defaults; set-but-malformed numbers are rejected.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_port = parse_var(&lookup, "SERVER_PORT", 8080u16)?;

        let fetch_timeout_secs =
            parse_var(&lookup, "FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS)?;
        if fetch_timeout_secs == 0 {
            return Err(ConfigError::Zero {
                name: "FETCH_TIMEOUT_SECS",
            });
        }

        let max_body_bytes = parse_var(&lookup, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?;
        if max_body_bytes == 0 {
            return Err(ConfigError::Zero {
                name: "MAX_BODY_BYTES",
            });
        }

        Ok(Config {
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            server_port,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            max_body_bytes,
            user_agent: lookup("USER_AGENT")
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            is_production: lookup("APP_ENV").as_deref() == Some("production"),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        None => Ok(default),
    }
}
