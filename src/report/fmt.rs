/// Human-readable byte sizes: binary units, at most one decimal,
/// trailing ".0" dropped
pub fn format_size(size: u64) -> String {
    if size == 0 {
        return "0 B".to_string();
    }
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let group = (((size as f64).ln() / 1024f64.ln()) as usize).min(UNITS.len() - 1);
    let value = size as f64 / 1024f64.powi(group as i32);
    let rendered = format!("{value:.1}");
    let rendered = rendered.strip_suffix(".0").unwrap_or(&rendered);
    format!("{} {}", rendered, UNITS[group])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(format_size(0), "0 B");
    }

    #[test]
    fn test_bytes() {
        assert_eq!(format_size(512), "512 B");
    }

    #[test]
    fn test_kilobytes() {
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
    }

    #[test]
    fn test_megabytes() {
        assert_eq!(format_size(5 * 1024 * 1024), "5 MB");
    }

    #[test]
    fn test_gigabytes_cap() {
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3 GB");
    }
}
