pub mod format;
pub mod model_utils;

pub use format::{format_gb, format_size};
pub use model_utils::resolve_model_id;
