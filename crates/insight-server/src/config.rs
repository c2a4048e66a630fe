use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Server settings, read once at startup from `INSIGHT_*` variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub jwt_secret: String,
    pub seed: bool,
    pub countries_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = var("INSIGHT_PORT", "5000")
            .parse()
            .context("INSIGHT_PORT must be a port number")?;
        let seed = match var("INSIGHT_SEED", "true").to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" => false,
            other => anyhow::bail!("INSIGHT_SEED must be true or false, got '{other}'"),
        };

        Ok(Self {
            host: var("INSIGHT_HOST", "0.0.0.0"),
            port,
            db_path: PathBuf::from(var("INSIGHT_DB_PATH", "auth.sqlite")),
            jwt_secret: var("INSIGHT_JWT_SECRET", "dev-secret-change-me"),
            seed,
            countries_url: var("INSIGHT_COUNTRIES_URL", "https://restcountries.com/v3.1"),
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
