pub mod advisor;
pub mod profiles;

pub use advisor::{suggest_configurations, suggest_with_catalog, ConfigurationOption};
pub use profiles::{group_by_tier, AcceleratorSpec, ACCELERATORS};
