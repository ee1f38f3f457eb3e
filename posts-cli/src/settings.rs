use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use posts_client::{ClientConfig, DEFAULT_API_BASE_URL};

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub log_level: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let api_base_url = std::env::var("POSTS_API_URL")
            .map(|value| value.trim().to_string())
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let connect_timeout_secs = parse_u64_env("POSTS_CONNECT_TIMEOUT_SECS", 5)?;
        let request_timeout_secs = parse_optional_u64_env("POSTS_REQUEST_TIMEOUT_SECS")?;
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            api_base_url,
            connect_timeout_secs,
            request_timeout_secs,
            log_level,
        })
    }

    /// `--api-url` имеет приоритет над `POSTS_API_URL`.
    pub fn client_config(&self, api_url_override: Option<String>) -> ClientConfig {
        let api_base_url = api_url_override
            .map(normalize_api_url)
            .unwrap_or_else(|| self.api_base_url.clone());

        ClientConfig {
            api_base_url,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

pub fn normalize_api_url(url: String) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url;
    }

    format!("http://{url}")
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_optional_u64_env(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => parse_u64_env(key, 0).map(Some),
        _ => Ok(None),
    }
}
