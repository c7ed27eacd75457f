//! Accelerator catalog
//!
//! A fixed, ordered table of datacenter and workstation GPUs. Edit the
//! table to add hardware; the advisor derives capacity tiers from it.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One accelerator model and how many can be combined in a single node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceleratorSpec {
    pub name: String,
    pub memory_gb: u32,
    pub max_count: u32,
}

impl AcceleratorSpec {
    pub fn new(name: impl Into<String>, memory_gb: u32, max_count: u32) -> Self {
        Self {
            name: name.into(),
            memory_gb,
            max_count,
        }
    }
}

/// (name, memory GB, max count)
const CATALOG_TABLE: &[(&str, u32, u32)] = &[
    ("NVIDIA H100", 80, 8),
    ("NVIDIA A100", 80, 8),
    ("NVIDIA A6000", 48, 10),
    ("NVIDIA A40", 48, 10),
    ("NVIDIA L40", 48, 8),
    ("NVIDIA L40S", 48, 8),
    ("NVIDIA RTX 6000 Ada", 48, 8),
    ("NVIDIA RTX 4090", 24, 8),
    ("NVIDIA RTX 3090", 24, 8),
    ("NVIDIA RTX A5000", 24, 8),
    ("NVIDIA L4", 24, 8),
    ("NVIDIA RTX 4000", 16, 8),
    ("NVIDIA A4000", 16, 8),
];

/// Built-in accelerator catalog, in table order
pub static ACCELERATORS: Lazy<Vec<AcceleratorSpec>> = Lazy::new(|| {
    CATALOG_TABLE
        .iter()
        .map(|&(name, memory_gb, max_count)| AcceleratorSpec::new(name, memory_gb, max_count))
        .collect()
});

/// Group accelerators by memory capacity, preserving catalog order within a tier
pub fn group_by_tier(catalog: &[AcceleratorSpec]) -> BTreeMap<u32, Vec<&AcceleratorSpec>> {
    let mut tiers: BTreeMap<u32, Vec<&AcceleratorSpec>> = BTreeMap::new();
    for spec in catalog {
        tiers.entry(spec.memory_gb).or_default().push(spec);
    }
    tiers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        assert_eq!(ACCELERATORS.len(), 13);
        assert_eq!(ACCELERATORS[0].name, "NVIDIA H100");
        assert!(ACCELERATORS.iter().all(|a| a.memory_gb > 0 && a.max_count > 0));
    }

    #[test]
    fn test_group_by_tier() {
        let tiers = group_by_tier(&ACCELERATORS);
        let capacities: Vec<u32> = tiers.keys().copied().collect();
        assert_eq!(capacities, vec![16, 24, 48, 80]);

        let names: Vec<&str> = tiers[&80].iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["NVIDIA H100", "NVIDIA A100"]);
        assert_eq!(tiers[&48].len(), 5);
    }
}
