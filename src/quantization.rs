//! Numeric precision formats and their byte weights
//!
//! Two independent tables live here: bytes per parameter (used for
//! accelerator memory) and GB per billion parameters (used for storage,
//! which folds in on-disk overhead). Keep them separate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrecisionFormat {
    Fp32,
    #[default]
    Fp16,
    Fp8,
    Int4,
    Unknown,
}

struct PrecisionWeights {
    format: PrecisionFormat,
    bytes_per_param: f64,
    storage_gb_per_billion: f64,
    label: &'static str,
}

const PRECISION_TABLE: &[PrecisionWeights] = &[
    PrecisionWeights {
        format: PrecisionFormat::Fp32,
        bytes_per_param: 4.0,
        storage_gb_per_billion: 8.0,
        label: "FP32 (32-bit floating point)",
    },
    PrecisionWeights {
        format: PrecisionFormat::Fp16,
        bytes_per_param: 2.0,
        storage_gb_per_billion: 4.0,
        label: "FP16 (16-bit floating point)",
    },
    PrecisionWeights {
        format: PrecisionFormat::Fp8,
        bytes_per_param: 1.0,
        storage_gb_per_billion: 2.0,
        label: "FP8 (8-bit floating point)",
    },
    PrecisionWeights {
        format: PrecisionFormat::Int4,
        bytes_per_param: 0.5,
        storage_gb_per_billion: 1.0,
        label: "INT4 (4-bit integer)",
    },
];

/// Unknown precision is sized as FP32
const FALLBACK: PrecisionFormat = PrecisionFormat::Fp32;

impl PrecisionFormat {
    /// Every format with known weights, widest first
    pub const KNOWN: [PrecisionFormat; 4] = [
        PrecisionFormat::Fp32,
        PrecisionFormat::Fp16,
        PrecisionFormat::Fp8,
        PrecisionFormat::Int4,
    ];

    fn weights(self) -> Option<&'static PrecisionWeights> {
        PRECISION_TABLE.iter().find(|w| w.format == self)
    }

    fn weights_or_fallback(self) -> &'static PrecisionWeights {
        self.weights()
            .or_else(|| FALLBACK.weights())
            .unwrap_or(&PRECISION_TABLE[0])
    }

    pub fn is_known(self) -> bool {
        self.weights().is_some()
    }

    /// Bytes per parameter held in accelerator memory
    pub fn bytes_per_param(self) -> f64 {
        self.weights_or_fallback().bytes_per_param
    }

    /// On-disk GB per billion parameters, including checkpoint overhead
    pub fn storage_gb_per_billion(self) -> f64 {
        self.weights_or_fallback().storage_gb_per_billion
    }

    /// Command-line name, as accepted by `FromStr`
    pub fn short_name(self) -> &'static str {
        match self {
            PrecisionFormat::Fp32 => "fp32",
            PrecisionFormat::Fp16 => "fp16",
            PrecisionFormat::Fp8 => "fp8",
            PrecisionFormat::Int4 => "int4",
            PrecisionFormat::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        self.weights().map(|w| w.label).unwrap_or("UNKNOWN")
    }

    /// Formats worth offering once this precision has been detected for a model.
    ///
    /// An FP32 checkpoint can reasonably be served in FP16; narrower formats
    /// are offered only as themselves.
    pub fn selectable_alternatives(self) -> Vec<PrecisionFormat> {
        match self {
            PrecisionFormat::Fp32 => vec![PrecisionFormat::Fp32, PrecisionFormat::Fp16],
            PrecisionFormat::Fp16 => vec![PrecisionFormat::Fp16],
            PrecisionFormat::Fp8 => vec![PrecisionFormat::Fp8],
            PrecisionFormat::Int4 => vec![PrecisionFormat::Int4],
            PrecisionFormat::Unknown => Self::KNOWN.to_vec(),
        }
    }
}

impl fmt::Display for PrecisionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PrecisionFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::KNOWN
            .into_iter()
            .find(|p| p.short_name() == name)
            .ok_or_else(|| {
                format!(
                    "unknown precision '{}', expected one of fp32, fp16, fp8, int4",
                    name
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_param() {
        assert_eq!(PrecisionFormat::Fp32.bytes_per_param(), 4.0);
        assert_eq!(PrecisionFormat::Fp16.bytes_per_param(), 2.0);
        assert_eq!(PrecisionFormat::Fp8.bytes_per_param(), 1.0);
        assert_eq!(PrecisionFormat::Int4.bytes_per_param(), 0.5);
    }

    #[test]
    fn test_storage_weights() {
        assert_eq!(PrecisionFormat::Fp32.storage_gb_per_billion(), 8.0);
        assert_eq!(PrecisionFormat::Fp16.storage_gb_per_billion(), 4.0);
        assert_eq!(PrecisionFormat::Fp8.storage_gb_per_billion(), 2.0);
        assert_eq!(PrecisionFormat::Int4.storage_gb_per_billion(), 1.0);
    }

    #[test]
    fn test_unknown_sized_as_fp32() {
        assert!(!PrecisionFormat::Unknown.is_known());
        assert_eq!(PrecisionFormat::Unknown.bytes_per_param(), 4.0);
        assert_eq!(PrecisionFormat::Unknown.storage_gb_per_billion(), 8.0);
        assert_eq!(PrecisionFormat::Unknown.label(), "UNKNOWN");
    }

    #[test]
    fn test_parse() {
        assert_eq!("FP16".parse::<PrecisionFormat>(), Ok(PrecisionFormat::Fp16));
        assert_eq!(" int4 ".parse::<PrecisionFormat>(), Ok(PrecisionFormat::Int4));
        assert!("bf16".parse::<PrecisionFormat>().is_err());
    }

    #[test]
    fn test_short_name_parses_back() {
        for precision in PrecisionFormat::KNOWN {
            assert_eq!(precision.short_name().parse::<PrecisionFormat>(), Ok(precision));
        }
        assert_eq!(PrecisionFormat::Unknown.short_name(), "unknown");
        assert!("unknown".parse::<PrecisionFormat>().is_err());
    }

    #[test]
    fn test_selectable_alternatives() {
        assert_eq!(
            PrecisionFormat::Fp32.selectable_alternatives(),
            vec![PrecisionFormat::Fp32, PrecisionFormat::Fp16]
        );
        assert_eq!(PrecisionFormat::Unknown.selectable_alternatives().len(), 4);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PrecisionFormat::Fp8).unwrap();
        assert_eq!(json, "\"FP8\"");
        let parsed: PrecisionFormat = serde_json::from_str("\"INT4\"").unwrap();
        assert_eq!(parsed, PrecisionFormat::Int4);
    }
}
