use serde::{Deserialize, Serialize};

/// Model registry connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Base URL; the model identifier is appended as a path
    pub endpoint: String,
    /// Environment variable holding the bearer token
    pub token_env: String,
    /// Request timeout; `None` keeps the transport default
    pub timeout_secs: Option<u64>,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://huggingface.co/api/models".to_string(),
            token_env: "HUGGING_FACE_TOKEN".to_string(),
            timeout_secs: None,
        }
    }
}

impl HubConfig {
    /// Token from the configured environment variable, if set and non-empty
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    pub fn model_url(&self, model_id: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), model_id)
    }
}
