//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_REPORTS_PATH: &str = "data/reports.json";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("unknown REPORTS_STORE: {0} (expected `file` or `memory`)")]
    UnknownStore(String),
}

/// Which repository backs the report collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// One JSON array file at `reports_path`.
    File,
    /// Process-local; lost on restart.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub reports_path: PathBuf,
    pub store: StoreKind,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `REPORTS_PATH`: default `data/reports.json`
    /// - `REPORTS_STORE`: `file` (default) or `memory`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `PORT` is not a valid port number or
    /// `REPORTS_STORE` names an unknown backend.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };
        let reports_path =
            std::env::var("REPORTS_PATH").map_or_else(|_| PathBuf::from(DEFAULT_REPORTS_PATH), PathBuf::from);
        let store = parse_store(std::env::var("REPORTS_STORE").as_deref().unwrap_or("file"))?;

        Ok(Self { port, reports_path, store })
    }

    /// Listen address on all interfaces.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_store(raw: &str) -> Result<StoreKind, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "file" => Ok(StoreKind::File),
        "memory" => Ok(StoreKind::Memory),
        other => Err(ConfigError::UnknownStore(other.to_owned())),
    }
}
