//! Descriptor normalization
//!
//! Each output is resolved by walking an ordered list of probes; the first
//! probe that returns `Some` wins. Probes never fail: a field that is
//! missing or has the wrong type simply yields `None`.

use crate::metadata::NormalizedMetadata;
use crate::quantization::PrecisionFormat;
use serde_json::{Map, Value};
use tracing::debug;

type ParameterCountProbe = fn(&Value) -> Option<u64>;
type PrecisionProbe = fn(&Value) -> Option<PrecisionFormat>;

const PARAMETER_COUNT_PROBES: &[(&str, ParameterCountProbe)] =
    &[("safetensors.parameters", safetensors_parameter_count)];

const PRECISION_PROBES: &[(&str, PrecisionProbe)] = &[
    ("safetensors.parameters", safetensors_precision),
    ("config", config_precision),
];

/// Keys inspected in the `config` block, in priority order
const CONFIG_DTYPE_KEYS: &[&str] = &["dtype", "torch_dtype", "precision"];

/// Map a remote descriptor onto a parameter count and precision
pub fn normalize(descriptor: &Value) -> NormalizedMetadata {
    let parameter_count_billion = first_match(descriptor, PARAMETER_COUNT_PROBES);
    let precision =
        first_match(descriptor, PRECISION_PROBES).unwrap_or(PrecisionFormat::Unknown);

    NormalizedMetadata {
        parameter_count_billion,
        precision,
    }
}

fn first_match<T>(descriptor: &Value, probes: &[(&str, fn(&Value) -> Option<T>)]) -> Option<T> {
    probes.iter().find_map(|(source, probe)| {
        let found = probe(descriptor);
        if found.is_some() {
            debug!("metadata resolved from {}", source);
        }
        found
    })
}

/// First entry of the per-precision parameter table, in source order
fn first_parameter_entry(descriptor: &Value) -> Option<(&String, &Value)> {
    descriptor
        .get("safetensors")?
        .get("parameters")?
        .as_object()
        .and_then(|table: &Map<String, Value>| table.iter().next())
}

fn safetensors_parameter_count(descriptor: &Value) -> Option<u64> {
    let (_, count) = first_parameter_entry(descriptor)?;
    let raw = count.as_f64()?;
    if !raw.is_finite() || raw <= 0.0 {
        return None;
    }
    Some((raw / 1e9).ceil() as u64)
}

fn safetensors_precision(descriptor: &Value) -> Option<PrecisionFormat> {
    let (key, _) = first_parameter_entry(descriptor)?;
    match key.to_uppercase().as_str() {
        "FP32" => Some(PrecisionFormat::Fp32),
        // bfloat16 has the same footprint as FP16
        "FP16" | "BF16" => Some(PrecisionFormat::Fp16),
        "FP8" => Some(PrecisionFormat::Fp8),
        "INT4" => Some(PrecisionFormat::Int4),
        _ => None,
    }
}

fn config_precision(descriptor: &Value) -> Option<PrecisionFormat> {
    let config = descriptor.get("config")?.as_object()?;

    // The first key present decides, even when its value is unusable
    let declared = match CONFIG_DTYPE_KEYS.iter().find_map(|key| config.get(*key)) {
        Some(value) => value,
        None => config.get("precision_config")?.as_object()?.get("dtype")?,
    };

    parse_dtype(declared.as_str()?)
}

fn parse_dtype(dtype: &str) -> Option<PrecisionFormat> {
    match dtype.to_lowercase().as_str() {
        "float32" | "torch.float32" | "fp32" => Some(PrecisionFormat::Fp32),
        "float16" | "torch.float16" | "bfloat16" | "torch.bfloat16" | "bf16" => {
            Some(PrecisionFormat::Fp16)
        }
        "fp8" | "float8" => Some(PrecisionFormat::Fp8),
        "int4" => Some(PrecisionFormat::Int4),
        _ => None,
    }
}
