//! Repository client configuration.

use std::time::Duration;

use anyhow::Context;
use reqwest::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/products";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const BASE_URL_ENV: &str = "MARGIN_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "MARGIN_API_TIMEOUT_SECS";

/// Where the product backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration for an explicit base URL with the default timeout.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid product API base url: {base_url}"))?;
        Ok(Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read configuration from `MARGIN_API_BASE_URL` and
    /// `MARGIN_API_TIMEOUT_SECS`, falling back to the local defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let base_url = lookup(BASE_URL_ENV).unwrap_or_else(|| {
            tracing::info!("{BASE_URL_ENV} not set; using {DEFAULT_BASE_URL}");
            DEFAULT_BASE_URL.to_string()
        });

        let mut config = Self::new(&base_url)?;

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{TIMEOUT_ENV} must be a whole number of seconds, got {raw:?}"))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
