//! Remote model metadata: fetching descriptors and normalizing them into
//! sizing inputs

pub mod client;
pub mod normalize;

pub use client::HubClient;
pub use normalize::normalize;

use crate::error::Advisory;
use crate::quantization::PrecisionFormat;
use serde::Serialize;

/// Sizing inputs recovered from a descriptor; either may be missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NormalizedMetadata {
    pub parameter_count_billion: Option<u64>,
    pub precision: PrecisionFormat,
}

impl NormalizedMetadata {
    pub fn advisories(&self) -> Vec<Advisory> {
        let mut advisories = Vec::new();
        if self.parameter_count_billion.is_none() {
            advisories.push(Advisory::MissingParameterCount);
        }
        if !self.precision.is_known() {
            advisories.push(Advisory::AmbiguousPrecision);
        }
        advisories
    }

    pub fn is_precision_ambiguous(&self) -> bool {
        !self.precision.is_known()
    }
}
