use anyhow::{Context, Result};
use std::env;

use taskhub_db::DbConfig;

/// Load the right environment file: `tests/.env.test` when the TESTING flag
/// is active, `.env` otherwise. Missing files are ignored so real
/// environment variables keep working.
pub fn load_env() {
    let testing = env::var("TESTING").map(|v| v == "true").unwrap_or(false);
    if testing {
        dotenv::from_filename("tests/.env.test").ok();
    } else {
        dotenv::dotenv().ok();
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database: DbConfig,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("API_PORT must be a valid port number")?;

        let database = DbConfig {
            host: env::var("DATABASE_HOST").context("DATABASE_HOST must be set")?,
            name: env::var("DATABASE_NAME").context("DATABASE_NAME must be set")?,
            user: env::var("DATABASE_USER").context("DATABASE_USER must be set")?,
            password: env::var("DATABASE_PASSWORD").context("DATABASE_PASSWORD must be set")?,
        };

        let cors_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_default();

        Ok(Self {
            port,
            database,
            cors_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
