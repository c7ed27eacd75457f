//! HTTP client for the model registry API

use crate::config::HubConfig;
use crate::error::{Result, SizerError};
use crate::metadata::{normalize, NormalizedMetadata};
use crate::utils::resolve_model_id;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Client for fetching model descriptors. One request per call, no retries.
pub struct HubClient {
    client: reqwest::Client,
    config: HubConfig,
    token: Option<String>,
}

impl HubClient {
    /// Build a client, reading the bearer token from the configured environment variable
    pub fn new(config: HubConfig) -> Result<Self> {
        let token = config.token();
        Self::with_token(config, token)
    }

    pub fn with_token(config: HubConfig, token: Option<String>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| SizerError::Config(format!("cannot build HTTP client: {}", e)))?;

        if token.is_none() {
            debug!(
                "{} not set; requesting metadata anonymously",
                config.token_env
            );
        }

        Ok(Self {
            client,
            config,
            token,
        })
    }

    /// Fetch the raw descriptor for an already-resolved identifier
    pub async fn fetch_descriptor(&self, model_id: &str) -> Result<Value> {
        let url = self.config.model_url(model_id);
        debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| SizerError::fetch_failed(model_id, e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let message = if text.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                format!("HTTP {}: {}", status, text.trim())
            };
            return Err(SizerError::fetch_failed(model_id, message));
        }

        resp.json()
            .await
            .map_err(|e| SizerError::fetch_failed(model_id, format!("invalid response body: {}", e)))
    }

    /// Resolve user input (identifier or URL), fetch it, and normalize the result
    pub async fn fetch_metadata(&self, input: &str) -> Result<NormalizedMetadata> {
        let model_id = resolve_model_id(input)?;
        let descriptor = self.fetch_descriptor(&model_id).await?;
        let metadata = normalize(&descriptor);

        info!(
            "{}: parameters={:?}B precision={:?}",
            model_id, metadata.parameter_count_billion, metadata.precision
        );
        for advisory in metadata.advisories() {
            warn!("{}: {}", model_id, advisory);
        }

        Ok(metadata)
    }
}
