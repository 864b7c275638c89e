//! Core domain types for aura
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Entry** | One check-in: mood, energy, a free-text note and tags at a point in time |
//! | **Collection** | The caller-owned list of entries, conventionally newest-first |
//! | **Insight** | A derived statistic, recomputed on every call and never persisted |
//!
//! Entries are immutable once created. Analytics only ever borrow `&[Entry]`.

use chrono::{DateTime, Datelike, FixedOffset, Local, Weekday};
use serde::{Deserialize, Serialize};

/// Lowest mood/energy score.
pub const MIN_SCORE: u8 = 1;
/// Highest mood/energy score.
pub const MAX_SCORE: u8 = 10;

/// Clamp an integer rating into the `[1, 10]` scale.
pub fn clamp_rating(value: i64) -> u8 {
    value.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as u8
}

/// Clamp a computed score into `[1.0, 10.0]`.
///
/// Every predicted mood/energy passes through here before it is reported.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_SCORE as f64;
    }
    value.clamp(MIN_SCORE as f64, MAX_SCORE as f64)
}

/// A single journal check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Opaque unique identifier (UUID v4)
    pub id: String,
    /// When the check-in happened, in the offset it was recorded with.
    ///
    /// Day-of-week analysis uses this offset, so the wire name stays `date`.
    #[serde(rename = "date")]
    pub timestamp: DateTime<FixedOffset>,
    /// Mood rating, 1-10
    pub mood: u8,
    /// Energy rating, 1-10
    pub energy: u8,
    /// Free-text note (may be empty)
    #[serde(default)]
    pub note: String,
    /// Context tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Entry {
    /// Create an entry stamped with the current local time.
    pub fn new(mood: i64, energy: i64, note: impl Into<String>, tags: Vec<String>) -> Self {
        Self::at(Local::now().fixed_offset(), mood, energy, note, tags)
    }

    /// Create an entry for an explicit point in time.
    ///
    /// Out-of-range ratings are clamped into `[1, 10]`.
    pub fn at(
        timestamp: DateTime<FixedOffset>,
        mood: i64,
        energy: i64,
        note: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        let clamped_mood = clamp_rating(mood);
        let clamped_energy = clamp_rating(energy);
        if clamped_mood as i64 != mood || clamped_energy as i64 != energy {
            tracing::warn!(mood, energy, "Clamped out-of-range check-in ratings");
        }

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp,
            mood: clamped_mood,
            energy: clamped_energy,
            note: note.into(),
            tags,
        }
    }

    /// Day of week in the entry's own offset.
    pub fn weekday(&self) -> Weekday {
        self.timestamp.weekday()
    }

    /// Mood as a float for statistics.
    pub fn mood_f64(&self) -> f64 {
        self.mood as f64
    }

    /// Energy as a float for statistics.
    pub fn energy_f64(&self) -> f64 {
        self.energy as f64
    }

    /// Mood plus energy.
    pub fn combined(&self) -> f64 {
        self.mood_f64() + self.energy_f64()
    }

    /// Whether this entry carries `tag` (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Tags with in-entry duplicates removed, first occurrence order kept.
    pub fn unique_tags(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            if !seen.contains(&tag.as_str()) {
                seen.push(tag.as_str());
            }
        }
        seen
    }
}

/// Split a comma-separated tag string into trimmed, non-empty tags.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Day index with Sunday = 0, matching the weekly bucket layout.
pub fn weekday_index(day: Weekday) -> usize {
    day.num_days_from_sunday() as usize
}

/// Full English day name for a Sunday-based index.
pub fn day_name(index: usize) -> &'static str {
    match index {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Unknown",
    }
}
