#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use cnf_core::{FactSource, FetchError, FetchedBody};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// HTTP client settings for fact requests
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FetchConfig {
    /// Request timeout (seconds); `None` keeps the client default
    #[serde(default)]
    pub timeout: Option<u64>,

    /// User-Agent header
    #[serde(default = "FetchConfig::default_user_agent")]
    pub user_agent: String,

    /// Maximum response size (bytes)
    #[serde(default = "FetchConfig::default_max_size")]
    pub max_size: usize,

    /// Honor `HTTP_PROXY` / `HTTPS_PROXY` / `NO_PROXY`
    #[serde(default = "FetchConfig::default_use_system_proxy")]
    pub use_system_proxy: bool,
}

impl FetchConfig {
    fn default_user_agent() -> String {
        format!("cnf/{}", env!("CARGO_PKG_VERSION"))
    }

    const fn default_max_size() -> usize {
        1_000_000 // 1MB
    }

    const fn default_use_system_proxy() -> bool {
        true
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: Self::default_user_agent(),
            max_size: Self::default_max_size(),
            use_system_proxy: Self::default_use_system_proxy(),
        }
    }
}

/// Fact source backed by a reqwest client
pub struct HttpFactSource {
    client: Client,
    config: FetchConfig,
}

impl HttpFactSource {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl FactSource for HttpFactSource {
    async fn get(&self, url: &str) -> Result<FetchedBody, FetchError> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        // Only support HTTP/HTTPS
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
                reason: "only http and https URLs are supported".to_string(),
            });
        }

        let response = self
            .client
            .get(parsed)
            .header("Accept", "text/plain, application/json, */*")
            .send()
            .await
            .map_err(|e| FetchError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status().as_u16();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(format!("Failed to read response: {e}")))?;

        if bytes.len() > self.config.max_size {
            return Err(FetchError::Transport(format!(
                "Response too large: {} bytes (max: {})",
                bytes.len(),
                self.config.max_size
            )));
        }

        debug!("Received {} bytes with status {status}", bytes.len());

        Ok(FetchedBody {
            body: String::from_utf8_lossy(&bytes).into_owned(),
            status,
        })
    }
}
