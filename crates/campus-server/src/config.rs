use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use campus_api::Latency;
use campus_db::{Database, KeyValueStore, MemoryStore};

/// `CAMPUS_DB_PATH` value that selects a throwaway in-memory medium.
const IN_MEMORY: &str = ":memory:";

pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    pub latency: Latency,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key).unwrap_or_else(|| {
                info!("{} not set, using default: {}", key, default);
                default.to_string()
            })
        };

        Ok(Self {
            host: var("CAMPUS_HOST", "0.0.0.0"),
            port: var("CAMPUS_PORT", "3000").parse()?,
            db_path: var("CAMPUS_DB_PATH", "campus.db"),
            latency: var("CAMPUS_LATENCY", "default").parse()?,
        })
    }

    pub fn open_medium(&self) -> Result<Arc<dyn KeyValueStore>> {
        if self.db_path == IN_MEMORY {
            info!("Using in-memory storage; nothing will be persisted");
            return Ok(Arc::new(MemoryStore::new()));
        }
        Ok(Arc::new(Database::open(&PathBuf::from(&self.db_path))?))
    }
}

#[cfg(test)]
mod tests {
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
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.db_path, "campus.db");
        assert_eq!(config.latency, Latency::standard());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("CAMPUS_PORT", "8080"),
            ("CAMPUS_DB_PATH", ":memory:"),
            ("CAMPUS_LATENCY", "none"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.latency, Latency::none());
        assert!(config.open_medium().is_ok());
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(Config::from_lookup(lookup(&[("CAMPUS_PORT", "http")])).is_err());
        assert!(Config::from_lookup(lookup(&[("CAMPUS_LATENCY", "turbo")])).is_err());
    }
}
