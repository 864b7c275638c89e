//! Temporal pattern analysis
//!
//! Day-of-week buckets come from each entry's timestamp. Recency (trend,
//! volatility) comes from the position in the given slice, newest first.

use serde::Serialize;

use super::stats;
use crate::types::{weekday_index, Entry};

/// Entries needed before a day-of-week bucket shifts a prediction.
const CYCLICAL_MIN_ENTRIES: usize = 7;

/// Aggregate of all entries falling on one weekday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DayBucket {
    pub count: usize,
    pub mood_sum: f64,
    pub energy_sum: f64,
}

impl DayBucket {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn mean_mood(&self) -> Option<f64> {
        (self.count > 0).then(|| self.mood_sum / self.count as f64)
    }

    pub fn mean_energy(&self) -> Option<f64> {
        (self.count > 0).then(|| self.energy_sum / self.count as f64)
    }

    /// Average of mean mood and mean energy.
    pub fn mean_combined(&self) -> Option<f64> {
        Some((self.mean_mood()? + self.mean_energy()?) / 2.0)
    }
}

/// Seven weekday buckets (Sunday = 0) plus the overall means.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayProfile {
    buckets: [DayBucket; 7],
    total: usize,
    overall_mood: f64,
    overall_energy: f64,
}

impl WeekdayProfile {
    /// Build the profile. `None` when there are no entries.
    pub fn from_entries(entries: &[Entry]) -> Option<Self> {
        let moods: Vec<f64> = entries.iter().map(Entry::mood_f64).collect();
        let energies: Vec<f64> = entries.iter().map(Entry::energy_f64).collect();
        let overall_mood = stats::mean(&moods)?;
        let overall_energy = stats::mean(&energies)?;

        let mut buckets = [DayBucket::default(); 7];
        for entry in entries {
            let bucket = &mut buckets[weekday_index(entry.weekday())];
            bucket.count += 1;
            bucket.mood_sum += entry.mood_f64();
            bucket.energy_sum += entry.energy_f64();
        }

        Some(Self {
            buckets,
            total: entries.len(),
            overall_mood,
            overall_energy,
        })
    }

    pub fn bucket(&self, day_index: usize) -> &DayBucket {
        &self.buckets[day_index % 7]
    }

    pub fn overall_mood(&self) -> f64 {
        self.overall_mood
    }

    pub fn overall_energy(&self) -> f64 {
        self.overall_energy
    }

    /// `(day index, mean mood)` for every weekday that has entries.
    pub fn mood_means(&self) -> Vec<(usize, f64)> {
        self.buckets
            .iter()
            .enumerate()
            .filter_map(|(day, b)| b.mean_mood().map(|m| (day, m)))
            .collect()
    }

    /// `(day index, mean energy)` for every weekday that has entries.
    pub fn energy_means(&self) -> Vec<(usize, f64)> {
        self.buckets
            .iter()
            .enumerate()
            .filter_map(|(day, b)| b.mean_energy().map(|m| (day, m)))
            .collect()
    }

    /// Fraction of weekdays with at least one entry.
    pub fn coverage(&self) -> f64 {
        self.buckets.iter().filter(|b| !b.is_empty()).count() as f64 / 7.0
    }

    /// Weekday with the highest mean mood. Earliest day wins ties.
    pub fn best_day(&self) -> Option<(usize, f64)> {
        self.mood_means()
            .into_iter()
            .fold(None, |best, (day, m)| match best {
                Some((_, bm)) if bm >= m => best,
                _ => Some((day, m)),
            })
    }

    /// Weekday with the lowest mean mood. Earliest day wins ties.
    pub fn worst_day(&self) -> Option<(usize, f64)> {
        self.mood_means()
            .into_iter()
            .fold(None, |worst, (day, m)| match worst {
                Some((_, wm)) if wm <= m => worst,
                _ => Some((day, m)),
            })
    }

    /// How far a weekday's combined average sits from the overall combined
    /// average.
    ///
    /// Zero for an empty bucket or when fewer than seven entries exist.
    pub fn cyclical_deviation(&self, day_index: usize) -> f64 {
        if self.total < CYCLICAL_MIN_ENTRIES {
            return 0.0;
        }
        let overall = (self.overall_mood + self.overall_energy) / 2.0;
        self.bucket(day_index)
            .mean_combined()
            .map(|day| day - overall)
            .unwrap_or(0.0)
    }
}

/// Per-entry change of `(mood + energy) / 2` across the first `window`
/// entries.
///
/// Positive means the newest entry is above the oldest one in the window.
/// Zero when the window holds fewer than three entries.
pub fn recent_trend(entries: &[Entry], window: usize) -> f64 {
    let recent = &entries[..entries.len().min(window)];
    if recent.len() < 3 {
        return 0.0;
    }
    let newest = &recent[0];
    let oldest = &recent[recent.len() - 1];
    let steps = (recent.len() - 1) as f64;
    (newest.combined() - oldest.combined()) / (2.0 * steps)
}

/// Absolute mood changes between neighbouring entries, in given order.
pub fn mood_changes(entries: &[Entry]) -> Vec<f64> {
    entries
        .windows(2)
        .map(|pair| (pair[0].mood_f64() - pair[1].mood_f64()).abs())
        .collect()
}

/// Mood volatility: mean and spread of neighbour-to-neighbour changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Volatility {
    pub mean: f64,
    pub std_dev: f64,
    pub transitions: usize,
}

impl Volatility {
    /// `None` with fewer than two entries.
    pub fn from_entries(entries: &[Entry]) -> Option<Self> {
        let changes = mood_changes(entries);
        Some(Self {
            mean: stats::mean(&changes)?,
            std_dev: stats::std_dev(&changes)?,
            transitions: changes.len(),
        })
    }

    /// "High", "Moderate" or "Low".
    pub fn label(&self) -> &'static str {
        if self.mean > 2.0 {
            "High"
        } else if self.mean > 1.0 {
            "Moderate"
        } else {
            "Low"
        }
    }
}

/// Whole days between the earliest and latest timestamp, rounded up.
pub fn time_span_days(entries: &[Entry]) -> i64 {
    let (Some(min), Some(max)) = (
        entries.iter().map(|e| e.timestamp).min(),
        entries.iter().map(|e| e.timestamp).max(),
    ) else {
        return 0;
    };
    const DAY_MS: i64 = 24 * 60 * 60 * 1000;
    let ms = (max - min).num_milliseconds();
    (ms + DAY_MS - 1) / DAY_MS
}

/// Mean mood of a slice of entries, `None` when empty.
pub fn mean_mood(entries: &[Entry]) -> Option<f64> {
    let moods: Vec<f64> = entries.iter().map(Entry::mood_f64).collect();
    stats::mean(&moods)
}

/// Mean energy of a slice of entries, `None` when empty.
pub fn mean_energy(entries: &[Entry]) -> Option<f64> {
    let energies: Vec<f64> = entries.iter().map(Entry::energy_f64).collect();
    stats::mean(&energies)
}
