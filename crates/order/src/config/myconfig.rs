use anyhow::{Context, Result};
use shared::config::{flag, parse_bool_strict, parse_or};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub run_migrations: bool,
    pub db_max_conn: u32,
    pub db_min_conn: u32,
    pub is_dev: bool,
    pub enable_file_log: bool,
    pub otel_endpoint: Option<String>,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let run_migrations = parse_bool_strict(&lookup, "RUN_MIGRATIONS", true)?;
        let db_max_conn = parse_or(&lookup, "DB_MAX_CONNECTION", 5u32)?;
        let db_min_conn = parse_or(&lookup, "DB_MIN_CONNECTION", 1u32)?;

        if db_min_conn > db_max_conn {
            anyhow::bail!(
                "DB_MIN_CONNECTION ({db_min_conn}) must not exceed DB_MAX_CONNECTION ({db_max_conn})"
            );
        }

        let otel_endpoint = lookup("OTEL_ENDPOINT").filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url,
            port,
            run_migrations,
            db_max_conn,
            db_min_conn,
            is_dev: flag(&lookup, "DEV_MODE"),
            enable_file_log: flag(&lookup, "ENABLE_FILE_LOG"),
            otel_endpoint,
        })
    }
}
