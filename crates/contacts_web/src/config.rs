//! Server configuration from environment variables.
//!
//! # Responsibility
//! - Resolve bind address, database path and logging options.
//! - Keep parsing testable by reading through a lookup function.

use std::env;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const BIND_ENV: &str = "CONTACTS_HTTP_BIND";
pub const DB_PATH_ENV: &str = "CONTACTS_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "CONTACTS_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "CONTACTS_LOG_DIR";

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_DB_PATH: &str = "contacts.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files; stderr when `None`.
    pub log_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}=`{}`: {}", self.key, self.value, self.reason)
    }
}

impl std::error::Error for ConfigError {}

impl WebConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_raw = read(BIND_ENV).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw.parse::<SocketAddr>().map_err(|err| ConfigError {
            key: BIND_ENV,
            value: bind_raw.clone(),
            reason: err.to_string(),
        })?;

        let db_path = read(DB_PATH_ENV).map_or_else(|| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from);
        let log_level = read(LOG_LEVEL_ENV)
            .unwrap_or_else(|| contacts_core::default_log_level().to_string());

        Ok(Self {
            bind,
            db_path,
            log_level,
            log_dir: read(LOG_DIR_ENV),
        })
    }
}
