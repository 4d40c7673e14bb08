//! Human readable byte counts

/// Bytes per unit step
pub const BYTES_PER_KB: f64 = 1024.0;

const SUFFIXES: [&str; 5] = ["B", "K", "M", "G", "T"];

/// Format a byte count as `1.5G`.
///
/// The value is divided by 1024 for as long as it shows four or more digits,
/// so the result never reads `1000.0K`. Terabytes is the last unit.
pub fn format_bytes(bytes: f64) -> String {
    let mut value = bytes;
    let mut unit = 0;
    while value >= 1000.0 && unit < SUFFIXES.len() - 1 {
        value /= BYTES_PER_KB;
        unit += 1;
    }
    format!("{:.1}{}", value, SUFFIXES[unit])
}

/// Format a transfer rate in bytes per second as `12.0K/s`
pub fn format_rate(bytes_per_sec: f64) -> String {
    format!("{}/s", format_bytes(bytes_per_sec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values_stay_in_bytes() {
        assert_eq!(format_bytes(0.0), "0.0B");
        assert_eq!(format_bytes(999.0), "999.0B");
    }

    #[test]
    fn test_switches_unit_at_four_digits() {
        assert_eq!(format_bytes(1000.0), "1.0K");
        assert_eq!(format_bytes(1536.0), "1.5K");
        assert_eq!(format_bytes(1024.0 * 1024.0 * 1024.0 * 1.5), "1.5G");
        // 1000K is shown as 1.0M rather than 1000.0K
        assert_eq!(format_bytes(1000.0 * 1024.0), "1.0M");
    }

    #[test]
    fn test_terabytes_is_the_largest_unit() {
        let petabyte = 1024f64.powi(5);
        assert_eq!(format_bytes(petabyte), "1024.0T");
    }

    #[test]
    fn test_rate_suffix() {
        assert_eq!(format_rate(100.0), "100.0B/s");
        assert_eq!(format_rate(2048.0), "2.0K/s");
    }
}
