/// Human-readable size: MB below 1 GB, otherwise GB with one decimal
pub fn format_size(size_gb: f64) -> String {
    if size_gb < 1.0 {
        format!("{} MB", (size_gb * 1024.0).round() as i64)
    } else {
        format!("{:.1} GB", size_gb)
    }
}

/// Two-decimal GB, as shown in requirement reports
pub fn format_gb(size_gb: f64) -> String {
    format!("{:.2} GB", size_gb)
}
