pub mod hub;
pub mod model;

use crate::error::{Result, SizerError};
use crate::hardware::{AcceleratorSpec, ACCELERATORS};
use crate::quantization::PrecisionFormat;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub use hub::HubConfig;
pub use model::{
    parse_param_count, preset_size, ModelShape, WorkloadMode, MODEL_SIZE_PRESETS,
};

/// Top-level configuration for a sizing run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelShape,
    pub hub: HubConfig,
    /// Replaces the built-in accelerator catalog when set
    pub accelerators: Option<Vec<AcceleratorSpec>>,
    /// Precision written explicitly in the loaded file, if any
    #[serde(skip)]
    pub pinned_precision: Option<PrecisionFormat>,
}

impl Config {
    pub fn for_model(size_preset: &str) -> Result<Self> {
        let billions = preset_size(size_preset).ok_or_else(|| {
            SizerError::Config(format!(
                "Unknown size preset: {}. Available: {:?}",
                size_preset,
                MODEL_SIZE_PRESETS.iter().map(|(n, _)| *n).collect::<Vec<_>>()
            ))
        })?;

        Ok(Self {
            model: ModelShape {
                parameter_count_billion: f64::from(billions),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    /// Load a JSON config file; omitted fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| SizerError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let value: serde_json::Value = serde_json::from_str(&json)
            .map_err(|e| SizerError::Config(format!("invalid {}: {}", path.display(), e)))?;
        Self::from_value(value)
            .map_err(|e| SizerError::Config(format!("invalid {}: {}", path.display(), e)))
    }

    fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        let pinned = value.pointer("/model/precision").is_some();
        let mut config: Self = serde_json::from_value(value)?;
        if pinned {
            config.pinned_precision = Some(config.model.precision);
        }
        Ok(config)
    }

    /// Accelerators the advisor should search
    pub fn catalog(&self) -> &[AcceleratorSpec] {
        self.accelerators.as_deref().unwrap_or(&ACCELERATORS)
    }

    pub fn to_dict(&self) -> Result<HashMap<String, serde_json::Value>> {
        let value = serde_json::to_value(self).map_err(|e| SizerError::Config(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| SizerError::Config(e.to_string()))
    }

    pub fn from_dict(data: HashMap<String, serde_json::Value>) -> Result<Self> {
        let value = serde_json::to_value(data).map_err(|e| SizerError::Config(e.to_string()))?;
        Self::from_value(value).map_err(|e| SizerError::Config(e.to_string()))
    }
}
