use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;
use std::{env, fs};

#[derive(Deserialize)]
pub struct Config {
    pub database_url: String,
}

impl Config {
    pub fn from_file(path: PathBuf) -> Result<Config, anyhow::Error> {
        let config = fs::read_to_string(path).context("Unable to read config file")?;
        let config: Config =
            toml::from_str(config.as_str()).with_context(|| "Unable to parse config")?;
        Ok(config)
    }

    /// DATABASE_URL wins; otherwise the URL is assembled from the POSTGRES_*
    /// variables with the same defaults the deployment scripts assume.
    pub fn from_env() -> Result<Config, anyhow::Error> {
        if let Ok(database_url) = env::var("DATABASE_URL") {
            return Ok(Config { database_url });
        }

        let host = env_or("POSTGRES_HOST", "localhost");
        let port = env_or("POSTGRES_PORT", "5432");
        let user = env_or("POSTGRES_USER", "postgres");
        let password = env_or("POSTGRES_PASSWORD", "123");
        let database = env_or("POSTGRES_DB", "accounting_app");

        let database_url = format!(
            "postgres://{}:{}@{}:{}/{}",
            user, password, host, port, database
        );
        Ok(Config { database_url })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
