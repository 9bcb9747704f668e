//! Configuration module for the incident registry.
//!
//! Loads configuration from built-in defaults, optional config files and
//! environment variables.

use std::path::PathBuf;

use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;

use crate::error::{IncidentError, IncidentResult};

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the landing page served at `/`.
    pub static_dir: PathBuf,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLx connection string, e.g. `sqlite://incidents.db`.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: String,
    /// Output format of log lines.
    pub format: LogFormat,
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line, for log shippers.
    Json,
    /// Multi-line human-readable output, for local runs.
    Pretty,
}

impl ServerConfig {
    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Path of the landing page.
    pub fn index_file(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (INCIDENTS__*)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml (if exists)
    /// 4. Built-in defaults
    pub fn load() -> IncidentResult<Self> {
        Self::load_with(
            Environment::with_prefix("INCIDENTS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
    }

    fn load_with(environment: Environment) -> IncidentResult<Self> {
        let config = ConfigLoader::builder()
            .set_default("server.host", "127.0.0.1")
            .and_then(|b| b.set_default("server.port", 5000))
            .and_then(|b| b.set_default("server.static_dir", "static"))
            .and_then(|b| b.set_default("database.url", "sqlite://incidents.db"))
            .and_then(|b| b.set_default("logging.filter", crate::logging::DEFAULT_FILTER))
            .and_then(|b| b.set_default("logging.format", "json"))
            .map_err(|e| IncidentError::Config(e.to_string()))?
            // Layer on file-based config
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Layer on environment variables
            .add_source(environment)
            .build()
            .map_err(|e| IncidentError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| IncidentError::Config(e.to_string()))
    }
}
