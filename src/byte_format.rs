const UNITS: [&'static str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count with two decimals and the largest unit that keeps the
/// value below 1024, stopping at TB.
pub fn format_bytes(bytes: f64) -> String {
    let mut value = bytes;
    let mut index = 0;
    while value >= 1024.0 && index < UNITS.len() - 1 {
        value /= 1024.0;
        index += 1;
    }
    format!("{:.2} {}", value, UNITS[index])
}
