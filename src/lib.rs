//! LLM Hardware Sizing
//!
//! Estimates how much accelerator memory and disk a large language model
//! needs for inference or training, and which GPU configurations can hold it.
//!
//! ## Main Components
//!
//! - `quantization`: Precision formats and their byte weights
//! - `hardware`: Accelerator catalog and configuration search
//! - `estimate`: Memory and storage models
//! - `metadata`: Registry client and descriptor normalization
//! - `config`: Workload shape, presets and hub settings
//!
//! Every operation is a pure function of its inputs; nothing is cached
//! between calls.

pub mod config;
pub mod error;
pub mod estimate;
pub mod hardware;
pub mod metadata;
pub mod quantization;
pub mod utils;

pub use config::{Config, HubConfig, ModelShape, WorkloadMode};
pub use error::{Advisory, Result, SizerError};
pub use estimate::{calculate_requirements, estimate_memory, estimate_storage, Requirements};
pub use hardware::{suggest_configurations, AcceleratorSpec, ConfigurationOption};
pub use metadata::{normalize, HubClient, NormalizedMetadata};
pub use quantization::PrecisionFormat;
