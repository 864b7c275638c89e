//! Formatting helpers shared by the CLI output.

use chrono::{DateTime, FixedOffset, Utc};

/// Format a timestamp relative to `now` (e.g., "2m ago").
pub fn format_relative_time(ts: DateTime<FixedOffset>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(ts);

    if duration.num_seconds() < 0 {
        "just now".to_string()
    } else if duration.num_seconds() < 60 {
        format!("{}s ago", duration.num_seconds())
    } else if duration.num_minutes() < 60 {
        format!("{}m ago", duration.num_minutes())
    } else if duration.num_hours() < 24 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_days() < 7 {
        format!("{}d ago", duration.num_days())
    } else {
        ts.format("%b %d").to_string()
    }
}

/// Fraction in `[0, 1]` as "NN%".
pub fn format_percent(fraction: f64) -> String {
    format!("{:.0}%", (fraction * 100.0).clamp(0.0, 100.0))
}

/// Ten-cell bar for a 1-10 rating.
pub fn rating_bar(value: f64) -> String {
    let filled = value.round().clamp(0.0, 10.0) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

/// Join a list for display, or a dash when empty.
pub fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-31T12:00:00+00:00")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_relative_time() {
        let base = now().fixed_offset();
        assert_eq!(format_relative_time(base - Duration::seconds(30), now()), "30s ago");
        assert_eq!(format_relative_time(base - Duration::minutes(5), now()), "5m ago");
        assert_eq!(format_relative_time(base - Duration::hours(3), now()), "3h ago");
        assert_eq!(format_relative_time(base - Duration::days(2), now()), "2d ago");
        assert_eq!(format_relative_time(base - Duration::days(20), now()), "Mar 11");
        assert_eq!(format_relative_time(base + Duration::minutes(1), now()), "just now");
    }

    #[test]
    fn test_percent_and_bar() {
        assert_eq!(format_percent(0.456), "46%");
        assert_eq!(format_percent(1.2), "100%");
        assert_eq!(rating_bar(7.4), "███████░░░");
        assert_eq!(rating_bar(1.0), "█░░░░░░░░░");
    }

    #[test]
    fn test_format_list() {
        assert_eq!(format_list(&[]), "-");
        assert_eq!(format_list(&["a".to_string(), "b".to_string()]), "a; b");
    }
}
