//! Error and advisory types for the sizing engine

use serde::Serialize;
use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, SizerError>;

#[derive(Error, Debug)]
pub enum SizerError {
    /// Retrieving a remote descriptor failed (network, auth, not found, bad body).
    /// The upstream message is kept verbatim.
    #[error("failed to fetch metadata for '{model_id}': {message}")]
    MetadataFetchFailed { model_id: String, message: String },

    #[error("invalid {field}: {reason}")]
    InvalidShapeParameter { field: &'static str, reason: String },

    #[error("invalid model identifier '{0}'")]
    InvalidModelId(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl SizerError {
    pub fn invalid_shape(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidShapeParameter {
            field,
            reason: reason.into(),
        }
    }

    pub fn fetch_failed(model_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MetadataFetchFailed {
            model_id: model_id.into(),
            message: message.into(),
        }
    }
}

/// Soft conditions raised while normalizing metadata.
///
/// These never abort a calculation; they tell the caller which inputs
/// must come from the user instead of the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Advisory {
    /// Precision could not be inferred and should be selected manually
    AmbiguousPrecision,
    /// The descriptor carried no parameter-count table
    MissingParameterCount,
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Advisory::AmbiguousPrecision => write!(
                f,
                "precision could not be determined automatically; select it manually"
            ),
            Advisory::MissingParameterCount => {
                write!(f, "parameter count not published; enter the model size manually")
            }
        }
    }
}
