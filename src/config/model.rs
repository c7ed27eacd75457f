use crate::error::{Result, SizerError};
use crate::metadata::NormalizedMetadata;
use crate::quantization::PrecisionFormat;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Whether the model is being served or trained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkloadMode {
    #[default]
    Inference,
    Training,
}

impl fmt::Display for WorkloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadMode::Inference => f.write_str("Inference"),
            WorkloadMode::Training => f.write_str("Training"),
        }
    }
}

impl FromStr for WorkloadMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inference" => Ok(WorkloadMode::Inference),
            "training" => Ok(WorkloadMode::Training),
            other => Err(format!(
                "unknown mode '{}', expected inference or training",
                other
            )),
        }
    }
}

/// Workload to size: model dimensions plus how it is run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelShape {
    pub parameter_count_billion: f64,
    pub precision: PrecisionFormat,
    pub context_length: u64,
    pub batch_size: u64,
    pub num_layers: u64,
    pub hidden_size: u64,
    pub mode: WorkloadMode,
    /// Assume a memory-efficient attention kernel (no materialized score matrix)
    pub efficient_attention: bool,
}

impl Default for ModelShape {
    fn default() -> Self {
        Self {
            parameter_count_billion: 123.0,
            precision: PrecisionFormat::Fp16,
            context_length: 2048,
            batch_size: 1,
            num_layers: 24,
            hidden_size: 4096,
            mode: WorkloadMode::Inference,
            efficient_attention: true,
        }
    }
}

impl ModelShape {
    /// Reject shapes the estimators would size nonsensically
    pub fn validate(&self) -> Result<()> {
        let params = self.parameter_count_billion;
        if !params.is_finite() || params <= 0.0 {
            return Err(SizerError::invalid_shape(
                "parameter_count_billion",
                format!("must be a positive number, got {}", params),
            ));
        }

        let integer_fields = [
            ("context_length", self.context_length),
            ("batch_size", self.batch_size),
            ("num_layers", self.num_layers),
            ("hidden_size", self.hidden_size),
        ];
        for (field, value) in integer_fields {
            if value == 0 {
                return Err(SizerError::invalid_shape(field, "must be positive, got 0"));
            }
        }

        if !self.precision.is_known() {
            return Err(SizerError::invalid_shape(
                "precision",
                "precision is UNKNOWN; choose fp32, fp16, fp8 or int4",
            ));
        }

        Ok(())
    }

    /// Overlay fetched metadata: a published parameter count and any
    /// recognised precision replace the user's values, absent fields keep them.
    pub fn with_metadata(mut self, metadata: &NormalizedMetadata) -> Self {
        if let Some(billions) = metadata.parameter_count_billion {
            self.parameter_count_billion = billions as f64;
        }
        if metadata.precision.is_known() {
            self.precision = metadata.precision;
        }
        self
    }
}

/// Common model sizes, in billions of parameters
pub const MODEL_SIZE_PRESETS: &[(&str, u32)] = &[
    ("8B", 8),
    ("13B", 13),
    ("30B", 30),
    ("70B", 70),
    ("123B", 123),
    ("175B", 175),
    ("350B", 350),
    ("405B", 405),
];

static PRESET_LOOKUP: Lazy<HashMap<String, u32>> = Lazy::new(|| {
    MODEL_SIZE_PRESETS
        .iter()
        .map(|&(name, billions)| (name.to_ascii_lowercase(), billions))
        .collect()
});

static PARAM_COUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*(?:b|billion)?\s*$").expect("valid regex")
});

/// Look up a named size preset such as `70B`
pub fn preset_size(name: &str) -> Option<u32> {
    PRESET_LOOKUP.get(&name.trim().to_ascii_lowercase()).copied()
}

/// Parse a parameter count like `70`, `70B`, `7.5b` or `13 billion`
pub fn parse_param_count(input: &str) -> Result<f64> {
    let caps = PARAM_COUNT_PATTERN.captures(input).ok_or_else(|| {
        SizerError::invalid_shape(
            "parameter_count_billion",
            format!("cannot parse '{}' as a parameter count", input),
        )
    })?;

    let value: f64 = caps[1].parse().map_err(|_| {
        SizerError::invalid_shape(
            "parameter_count_billion",
            format!("cannot parse '{}' as a parameter count", input),
        )
    })?;

    if value <= 0.0 {
        return Err(SizerError::invalid_shape(
            "parameter_count_billion",
            format!("must be a positive number, got {}", value),
        ));
    }
    Ok(value)
}
