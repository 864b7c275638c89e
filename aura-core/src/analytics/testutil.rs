//! Entry builders for analytics tests.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};

use crate::types::{parse_tags, Entry};

/// Newest entry timestamp used by [`daily_entries`]: Sunday 2024-03-31, noon UTC.
pub const NEWEST: &str = "2024-03-31T12:00:00+00:00";

/// Calendar date of [`NEWEST`], the natural `as_of` for forecasts over [`daily_entries`].
pub fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
}

/// Entry at an RFC 3339 timestamp with comma-separated tags.
pub fn entry_at(ts: &str, mood: i64, energy: i64, tags: &str) -> Entry {
    let timestamp = DateTime::<FixedOffset>::parse_from_rfc3339(ts).unwrap();
    Entry::at(timestamp, mood, energy, "", parse_tags(tags))
}

/// One entry per day, newest first, ending at [`NEWEST`].
pub fn daily_entries(specs: &[(i64, i64, &str)]) -> Vec<Entry> {
    let newest = DateTime::<FixedOffset>::parse_from_rfc3339(NEWEST).unwrap();
    specs
        .iter()
        .enumerate()
        .map(|(i, (mood, energy, tags))| {
            Entry::at(
                newest - Duration::days(i as i64),
                *mood,
                *energy,
                "",
                parse_tags(tags),
            )
        })
        .collect()
}

/// `n` daily entries with the given mood and energy, newest first.
pub fn flat_entries(n: usize, mood: i64, energy: i64) -> Vec<Entry> {
    daily_entries(&vec![(mood, energy, ""); n])
}
