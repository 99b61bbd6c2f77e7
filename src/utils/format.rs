//! Time display formatting

/// Format a second count as `HH:MM:SS`, each field zero-padded to two
/// digits. Hours grow past two digits for very long durations.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_formats_as_all_zeros() {
        assert_eq!(format_hms(0), "00:00:00");
    }

    #[test]
    fn seconds_only() {
        assert_eq!(format_hms(59), "00:00:59");
    }

    #[test]
    fn hours_minutes_seconds() {
        assert_eq!(format_hms(3661), "01:01:01");
        assert_eq!(format_hms(3600), "01:00:00");
        assert_eq!(format_hms(60), "00:01:00");
    }

    #[test]
    fn hours_grow_past_two_digits() {
        assert_eq!(format_hms(100 * 3600), "100:00:00");
        assert_eq!(format_hms(100 * 3600 + 59), "100:00:59");
    }
}
