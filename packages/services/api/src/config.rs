//! Service configuration

use std::env;

/// API configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port
    pub port: u16,

    /// SQLite database URL
    pub db_url: String,

    /// Token signing secret. Required: the process refuses to start
    /// without it, and it is never mutated afterwards.
    pub secret_key: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            port: env::var("PINBOARD_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,

            db_url: env::var("PINBOARD_DB_URL")
                .unwrap_or_else(|_| "sqlite://pinboard.db".to_string()),

            secret_key: env::var("PINBOARD_SECRET_KEY")
                .map_err(|_| anyhow::anyhow!("PINBOARD_SECRET_KEY must be set"))?,
        })
    }
}
