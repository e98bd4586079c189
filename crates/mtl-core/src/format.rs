//! Human-readable durations.

/// Formats a minute count as `"N mins"` below an hour or `"H h MM"` above.
///
/// Negative durations are shown as `"0 mins"`.
pub fn format_duration(minutes: i64) -> String {
    let minutes = minutes.max(0);
    if minutes >= 60 {
        format!("{} h {:02}", minutes / 60, minutes % 60)
    } else {
        format!("{minutes} mins")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_minutes_only() {
        assert_eq!(format_duration(55), "55 mins");
        assert_eq!(format_duration(1), "1 mins");
    }

    #[test]
    fn test_format_duration_zero() {
        assert_eq!(format_duration(0), "0 mins");
    }

    #[test]
    fn test_format_duration_hours_pad_minutes() {
        assert_eq!(format_duration(125), "2 h 05");
        assert_eq!(format_duration(60), "1 h 00");
        assert_eq!(format_duration(59), "59 mins");
    }

    #[test]
    fn test_format_duration_large_values() {
        assert_eq!(format_duration(40 * 60 + 59), "40 h 59");
    }

    #[test]
    fn test_format_duration_negative_is_zero() {
        assert_eq!(format_duration(-5), "0 mins");
    }
}
