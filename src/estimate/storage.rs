use crate::quantization::PrecisionFormat;

/// Fixed deployment overhead (OS image, runtime, logs)
pub const BASE_STORAGE_GB: f64 = 100.0;

/// Operational allowance per context token
pub const STORAGE_GB_PER_TOKEN: f64 = 0.001;

/// Persistent storage needed for the model plus runtime overhead, in GB
pub fn estimate_storage(
    parameter_count_billion: f64,
    precision: PrecisionFormat,
    context_length: u64,
) -> f64 {
    let model_gb = parameter_count_billion * precision.storage_gb_per_billion();
    let operational_gb = context_length as f64 * STORAGE_GB_PER_TOKEN;
    model_gb + operational_gb + BASE_STORAGE_GB
}
