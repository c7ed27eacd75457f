//! Analytic accelerator-memory model
//!
//! Weights plus one set of attention activations. Training doubles the
//! weight term (gradients and optimizer state) and keeps activations for
//! every layer. The attention-score term is quadratic in context length
//! and disappears when an efficient attention kernel is assumed.

use crate::config::{ModelShape, WorkloadMode};
use serde::Serialize;

/// Fixed attention head width
pub const HEAD_DIM: f64 = 64.0;

const BYTES_PER_GB: f64 = 1e9;

/// Per-term decomposition of the memory estimate, all in GB
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryBreakdown {
    pub params_gb: f64,
    pub qkv_gb: f64,
    pub attention_scores_gb: f64,
    pub output_gb: f64,
    /// Activations actually held: one layer for inference, all layers for training
    pub activations_gb: f64,
    pub total_gb: f64,
}

impl MemoryBreakdown {
    pub fn per_layer_activations_gb(&self) -> f64 {
        self.qkv_gb + self.attention_scores_gb + self.output_gb
    }
}

pub fn estimate_memory_breakdown(shape: &ModelShape) -> MemoryBreakdown {
    let bytes = shape.precision.bytes_per_param();
    let params_gb = shape.parameter_count_billion * 1e9 * bytes / BYTES_PER_GB;

    let batch = shape.batch_size as f64;
    let context = shape.context_length as f64;
    let hidden = shape.hidden_size as f64;
    // Not rounded: a hidden size that is not a multiple of 64 gives a fractional head count
    let num_heads = hidden / HEAD_DIM;

    let qkv_gb = 3.0 * batch * context * hidden * bytes / BYTES_PER_GB;
    let output_gb = batch * context * hidden * bytes / BYTES_PER_GB;
    let attention_scores_gb = if shape.efficient_attention {
        0.0
    } else {
        batch * num_heads * context * context * bytes / BYTES_PER_GB
    };

    let per_layer = qkv_gb + attention_scores_gb + output_gb;

    let (activations_gb, total_gb) = match shape.mode {
        WorkloadMode::Inference => (per_layer, params_gb + per_layer),
        WorkloadMode::Training => {
            let activations = per_layer * shape.num_layers as f64;
            (activations, 2.0 * params_gb + activations)
        }
    };

    MemoryBreakdown {
        params_gb,
        qkv_gb,
        attention_scores_gb,
        output_gb,
        activations_gb,
        total_gb,
    }
}

/// Required accelerator memory in GB.
///
/// Assumes a validated shape; non-positive inputs give meaningless numbers.
pub fn estimate_memory(shape: &ModelShape) -> f64 {
    estimate_memory_breakdown(shape).total_gb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantization::PrecisionFormat;

    fn reference_shape() -> ModelShape {
        ModelShape {
            parameter_count_billion: 70.0,
            precision: PrecisionFormat::Fp16,
            context_length: 2048,
            batch_size: 1,
            num_layers: 24,
            hidden_size: 4096,
            mode: WorkloadMode::Inference,
            efficient_attention: true,
        }
    }

    #[test]
    fn test_inference_efficient_attention_reference() {
        let b = estimate_memory_breakdown(&reference_shape());
        // 70e9 * 2 bytes
        assert!((b.params_gb - 140.0).abs() < 1e-9);
        // 3 * 2048 * 4096 * 2 / 1e9
        assert!((b.qkv_gb - 0.050331648).abs() < 1e-12);
        // 2048 * 4096 * 2 / 1e9
        assert!((b.output_gb - 0.016777216).abs() < 1e-12);
        assert_eq!(b.attention_scores_gb, 0.0);
        assert!((b.total_gb - 140.067108864).abs() < 1e-9);
        assert_eq!(estimate_memory(&reference_shape()), b.total_gb);
    }

    #[test]
    fn test_full_attention_adds_quadratic_term() {
        let shape = ModelShape {
            efficient_attention: false,
            ..reference_shape()
        };
        let b = estimate_memory_breakdown(&shape);
        // 64 heads * 2048^2 * 2 bytes / 1e9
        assert!((b.attention_scores_gb - 0.536870912).abs() < 1e-12);

        let doubled = ModelShape {
            context_length: 4096,
            ..shape.clone()
        };
        let d = estimate_memory_breakdown(&doubled);
        assert!((d.attention_scores_gb / b.attention_scores_gb - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_training_doubles_params_and_scales_by_layers() {
        let shape = ModelShape {
            mode: WorkloadMode::Training,
            ..reference_shape()
        };
        let b = estimate_memory_breakdown(&shape);
        let per_layer = 0.050331648 + 0.016777216;
        assert!((b.activations_gb - 24.0 * per_layer).abs() < 1e-9);
        assert!((b.total_gb - (280.0 + 24.0 * per_layer)).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_heads_are_kept() {
        let shape = ModelShape {
            hidden_size: 100,
            context_length: 10,
            efficient_attention: false,
            ..reference_shape()
        };
        let b = estimate_memory_breakdown(&shape);
        // 100 / 64 = 1.5625 heads
        let expected = 1.5625 * 100.0 * 2.0 / 1e9;
        assert!((b.attention_scores_gb - expected).abs() < 1e-18);
    }

    #[test]
    fn test_precision_scales_everything() {
        let fp16 = estimate_memory(&reference_shape());
        let int4 = estimate_memory(&ModelShape {
            precision: PrecisionFormat::Int4,
            ..reference_shape()
        });
        assert!((fp16 / int4 - 4.0).abs() < 1e-9);
    }
}
