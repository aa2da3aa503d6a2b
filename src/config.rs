use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

/// Which product store the server talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("unknown STORE backend: {other}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", lookup("PORT"), 3000u16)?;
        let store = parse_or("STORE", lookup("STORE"), StoreBackend::Postgres)?;
        let max_connections = parse_or("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS"), 10u32)?;

        let database_url = lookup("DATABASE_URL");
        if store == StoreBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL must be set when STORE=postgres");
        }

        Ok(Self {
            host,
            port,
            store,
            database_url,
            max_connections,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(v) => v
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("invalid {key} value {v:?}")),
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_with_database_url() {
        let cfg = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://x")]))
            .expect("config should load");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.store, StoreBackend::Postgres);
        assert_eq!(cfg.max_connections, 10);
        assert_eq!(cfg.listen_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn port_comes_from_env() {
        let cfg = AppConfig::from_lookup(lookup(&[("PORT", "8081"), ("STORE", "memory")]))
            .expect("config should load");
        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.store, StoreBackend::Memory);
        assert!(cfg.database_url.is_none());
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn rejects_bad_port() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "eighty"), ("STORE", "memory")]))
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn rejects_unknown_store() {
        assert!("redis".parse::<StoreBackend>().is_err());
        assert_eq!(" Memory ".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
    }
}
