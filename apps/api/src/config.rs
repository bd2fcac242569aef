use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Where the keyword history lives.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryBackendConfig {
    File { path: PathBuf },
    Redis { url: String },
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub history_backend: HistoryBackendConfig,
    pub llm_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let history_backend = match lookup("HISTORY_BACKEND").as_deref().unwrap_or("file") {
            "file" => HistoryBackendConfig::File {
                path: lookup("HISTORY_PATH")
                    .unwrap_or_else(|| "data/keyword_history.json".to_string())
                    .into(),
            },
            "redis" => HistoryBackendConfig::Redis {
                url: require("REDIS_URL")?,
            },
            other => bail!("HISTORY_BACKEND must be 'file' or 'redis', got '{other}'"),
        };

        Ok(Config {
            gemini_api_key: require("GEMINI_API_KEY")?,
            history_backend,
            llm_timeout: Duration::from_secs(
                lookup("LLM_TIMEOUT_SECS")
                    .unwrap_or_else(|| "300".to_string())
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("GEMINI_API_KEY", "test-key")]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.llm_timeout, Duration::from_secs(300));
        assert_eq!(
            config.history_backend,
            HistoryBackendConfig::File {
                path: PathBuf::from("data/keyword_history.json")
            }
        );
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_redis_backend_requires_url() {
        assert!(config_from(&[("GEMINI_API_KEY", "k"), ("HISTORY_BACKEND", "redis")]).is_err());

        let config = config_from(&[
            ("GEMINI_API_KEY", "k"),
            ("HISTORY_BACKEND", "redis"),
            ("REDIS_URL", "redis://127.0.0.1/"),
        ])
        .unwrap();
        assert_eq!(
            config.history_backend,
            HistoryBackendConfig::Redis {
                url: "redis://127.0.0.1/".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_backend_fails() {
        assert!(config_from(&[("GEMINI_API_KEY", "k"), ("HISTORY_BACKEND", "sqlite")]).is_err());
    }

    #[test]
    fn test_bad_port_fails() {
        assert!(config_from(&[("GEMINI_API_KEY", "k"), ("PORT", "eighty")]).is_err());
    }
}
