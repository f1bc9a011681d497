use std::env;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreBackend {
    Mysql,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub run_migrations: bool,

    pub api_prefix: String,
    pub rate_api_per_min: u32,

    pub log_dir: String,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let store_backend = parse::<StoreBackend>("STORE_BACKEND", &var("STORE_BACKEND", "mysql"))?;
        let database_url = lookup("DATABASE_URL");
        if store_backend == StoreBackend::Mysql && database_url.is_none() {
            bail!("DATABASE_URL must be set when STORE_BACKEND is mysql");
        }

        Ok(Self {
            server_addr: var("SERVER_ADDR", "127.0.0.1:8080"),
            store_backend,
            database_url,
            database_max_connections: parse(
                "DATABASE_MAX_CONNECTIONS",
                &var("DATABASE_MAX_CONNECTIONS", "5"),
            )?,
            run_migrations: parse("RUN_MIGRATIONS", &var("RUN_MIGRATIONS", "true"))?,

            api_prefix: var("API_PREFIX", "/api"),
            rate_api_per_min: parse("RATE_API_PER_MIN", &var("RATE_API_PER_MIN", "1000"))?,

            log_dir: var("LOG_DIR", "logs"),
            log_level: parse("LOG_LEVEL", &var("LOG_LEVEL", "debug"))?,
        })
    }
}

fn parse<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("{key} has an invalid value: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_for_memory_backend() {
        let config = load(&[("STORE_BACKEND", "memory")]).unwrap();

        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.server_addr, "127.0.0.1:8080");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.rate_api_per_min, 1000);
        assert_eq!(config.log_level, tracing::Level::DEBUG);
        assert!(config.run_migrations);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn mysql_requires_database_url() {
        assert!(load(&[]).is_err());

        let config = load(&[("DATABASE_URL", "mysql://root@localhost/emp")]).unwrap();
        assert_eq!(config.store_backend, StoreBackend::Mysql);
    }

    #[test]
    fn rejects_malformed_numbers() {
        let err = load(&[("STORE_BACKEND", "memory"), ("RATE_API_PER_MIN", "lots")]).unwrap_err();

        assert!(err.to_string().contains("RATE_API_PER_MIN"));
    }

    #[test]
    fn reads_log_level_and_backend_case_insensitively() {
        let config = load(&[("STORE_BACKEND", "MEMORY"), ("LOG_LEVEL", "warn")]).unwrap();

        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.log_level, tracing::Level::WARN);
    }
}
