//! Service configuration, built from environment variables.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Path to the SQLite database file.
    pub db_path: PathBuf,
    /// Optional landing page HTML file served at `/`.
    pub landing_page: PathBuf,
}

impl AppConfig {
    /// Build config from environment variables, with defaults for everything.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("LEAD_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port: u16 = match std::env::var("LEAD_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "LEAD_PORT".into(),
                message: format!("not a valid port number: {raw}"),
            })?,
            Err(_) => 8000,
        };

        let db_path = std::env::var("LEAD_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/leads.db"));

        let landing_page = std::env::var("LEAD_LANDING_PAGE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./index.html"));

        Ok(Self {
            bind_addr: format!("{host}:{port}"),
            db_path,
            landing_page,
        })
    }
}
