//! GPU configuration search
//!
//! For each capacity tier (largest first) find the smallest accelerator
//! count whose combined memory covers the requirement. Every viable tier
//! reports its own minimum, so callers see a spread of options rather
//! than a single pick.

use crate::hardware::profiles::{group_by_tier, AcceleratorSpec, ACCELERATORS};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A viable multi-GPU configuration within one capacity tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationOption {
    pub count: u32,
    pub tier_memory_gb: u32,
    /// Accelerators in the tier that support `count` units together
    pub accelerators: Vec<String>,
}

impl ConfigurationOption {
    pub fn total_memory_gb(&self) -> f64 {
        f64::from(self.count) * f64::from(self.tier_memory_gb)
    }

    /// Short form, e.g. `2 x 80GB GPUs`
    pub fn summary(&self) -> String {
        format!("{} x {}GB GPUs", self.count, self.tier_memory_gb)
    }
}

impl fmt::Display for ConfigurationOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.summary(), self.accelerators.join(", "))
    }
}

/// Suggest configurations from the built-in catalog
pub fn suggest_configurations(total_memory_gb: f64) -> Vec<ConfigurationOption> {
    suggest_with_catalog(total_memory_gb, &ACCELERATORS)
}

/// Suggest configurations from a caller-supplied catalog
pub fn suggest_with_catalog(
    total_memory_gb: f64,
    catalog: &[AcceleratorSpec],
) -> Vec<ConfigurationOption> {
    let tiers = group_by_tier(catalog);
    let mut options = Vec::new();

    for (&tier_memory_gb, members) in tiers.iter().rev() {
        let max_count = members.iter().map(|a| a.max_count).max().unwrap_or(0);

        let minimal = (1..=max_count)
            .find(|&count| f64::from(count) * f64::from(tier_memory_gb) >= total_memory_gb);

        let Some(count) = minimal else {
            debug!(
                "{}GB tier cannot reach {:.2}GB with at most {} units",
                tier_memory_gb, total_memory_gb, max_count
            );
            continue;
        };

        let accelerators: Vec<String> = members
            .iter()
            .filter(|a| a.max_count >= count)
            .map(|a| a.name.clone())
            .collect();

        if !accelerators.is_empty() {
            options.push(ConfigurationOption {
                count,
                tier_memory_gb,
                accelerators,
            });
        }
    }

    options
}
