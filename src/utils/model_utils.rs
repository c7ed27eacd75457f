//! Model identifier handling
//!
//! Users paste either a bare registry identifier (`org/name`) or a full
//! model page URL; both resolve to the `org/name` form used by the API.

use crate::error::{Result, SizerError};

/// Resolves user input to a registry model identifier
///
/// # Arguments
/// * `input` - Identifier (e.g. "meta-llama/Llama-3.1-8B") or a URL such as
///   "https://huggingface.co/meta-llama/Llama-3.1-8B"
///
/// # Returns
/// * `Ok(String)` - The identifier; for URLs, the last two path segments
///   (or the only one, for unnamespaced models)
/// * `Err(SizerError::InvalidModelId)` - Blank input or a URL with no path
pub fn resolve_model_id(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SizerError::InvalidModelId(input.to_string()));
    }

    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Ok(trimmed.to_string());
    }

    // Drop scheme and host, keep the path
    let path: Vec<&str> = trimmed
        .split('/')
        .filter(|s| !s.is_empty())
        .skip(2)
        .collect();

    match path.len() {
        0 => Err(SizerError::InvalidModelId(input.to_string())),
        1 => Ok(path[0].to_string()),
        n => Ok(path[n - 2..].join("/")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_identifier_passes_through() {
        assert_eq!(
            resolve_model_id("sentence-transformers/all-mpnet-base-v2").unwrap(),
            "sentence-transformers/all-mpnet-base-v2"
        );
        assert_eq!(resolve_model_id("  gpt2 ").unwrap(), "gpt2");
    }

    #[test]
    fn test_http_prefixed_org_is_not_a_url() {
        assert_eq!(
            resolve_model_id("httpx-org/some-model").unwrap(),
            "httpx-org/some-model"
        );
        assert_eq!(resolve_model_id("https-models/tiny").unwrap(), "https-models/tiny");
    }

    #[test]
    fn test_url_takes_last_two_segments() {
        assert_eq!(
            resolve_model_id("https://huggingface.co/sentence-transformers/all-mpnet-base-v2")
                .unwrap(),
            "sentence-transformers/all-mpnet-base-v2"
        );
        assert_eq!(
            resolve_model_id("https://huggingface.co/meta-llama/Llama-3.1-8B/").unwrap(),
            "meta-llama/Llama-3.1-8B"
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(resolve_model_id("   ").is_err());
        assert!(resolve_model_id("https://huggingface.co/").is_err());
        assert!(resolve_model_id("https://huggingface.co").is_err());
    }

    #[test]
    fn test_unnamespaced_url() {
        assert_eq!(resolve_model_id("https://huggingface.co/gpt2").unwrap(), "gpt2");
    }
}
