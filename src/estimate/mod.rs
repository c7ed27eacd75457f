//! Memory, storage and configuration estimates for a workload

pub mod memory;
pub mod storage;

pub use memory::{estimate_memory, estimate_memory_breakdown, MemoryBreakdown, HEAD_DIM};
pub use storage::{estimate_storage, BASE_STORAGE_GB, STORAGE_GB_PER_TOKEN};

use crate::config::ModelShape;
use crate::error::Result;
use crate::hardware::{suggest_with_catalog, AcceleratorSpec, ConfigurationOption, ACCELERATORS};
use serde::Serialize;
use tracing::debug;

/// Everything computed for one shape
#[derive(Debug, Clone, Serialize)]
pub struct Requirements {
    pub shape: ModelShape,
    pub memory: MemoryBreakdown,
    pub total_memory_gb: f64,
    pub storage_gb: f64,
    pub configurations: Vec<ConfigurationOption>,
}

/// Validate the shape, then run memory, storage and configuration estimates
pub fn calculate_requirements(shape: &ModelShape) -> Result<Requirements> {
    calculate_requirements_with_catalog(shape, &ACCELERATORS)
}

pub fn calculate_requirements_with_catalog(
    shape: &ModelShape,
    catalog: &[AcceleratorSpec],
) -> Result<Requirements> {
    shape.validate()?;

    let memory = estimate_memory_breakdown(shape);
    let storage_gb = estimate_storage(
        shape.parameter_count_billion,
        shape.precision,
        shape.context_length,
    );
    let configurations = suggest_with_catalog(memory.total_gb, catalog);

    debug!(
        "{}B {:?} {}: memory {:.2}GB, storage {:.2}GB, {} configurations",
        shape.parameter_count_billion,
        shape.precision,
        shape.mode,
        memory.total_gb,
        storage_gb,
        configurations.len()
    );

    Ok(Requirements {
        shape: shape.clone(),
        memory,
        total_memory_gb: memory.total_gb,
        storage_gb,
        configurations,
    })
}
