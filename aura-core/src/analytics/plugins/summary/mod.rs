//! Detailed statistics: descriptive numbers for mood and energy, streaks
//! and volatility.

use serde::Serialize;

use crate::analytics::engine::{AnalyticsContext, Analyzer};
use crate::analytics::insight::Insight;
use crate::analytics::stats;
use crate::analytics::temporal::{time_span_days, Volatility};
use crate::types::Entry;

pub const MIN_ENTRIES: usize = 1;

const POSITIVE_MOOD: u8 = 6;
const NEGATIVE_MOOD: u8 = 4;

/// Descriptive statistics of one rating series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    pub mean: f64,
    /// Upper median: the element at `n / 2` after sorting
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl SeriesStats {
    /// `None` for an empty series.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mean = stats::mean(values)?;
        let std_dev = stats::std_dev(values)?;
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            mean,
            median: sorted[sorted.len() / 2],
            std_dev,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Longest runs of good and bad mood, in the given order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Streaks {
    /// Consecutive entries with mood ≥ 6
    pub longest_positive: usize,
    /// Consecutive entries with mood ≤ 4
    pub longest_negative: usize,
}

impl Streaks {
    pub fn from_entries(entries: &[Entry]) -> Self {
        let mut streaks = Streaks::default();
        let (mut positive, mut negative) = (0usize, 0usize);

        for entry in entries {
            if entry.mood >= POSITIVE_MOOD {
                positive += 1;
                negative = 0;
            } else if entry.mood <= NEGATIVE_MOOD {
                negative += 1;
                positive = 0;
            } else {
                positive = 0;
                negative = 0;
            }
            streaks.longest_positive = streaks.longest_positive.max(positive);
            streaks.longest_negative = streaks.longest_negative.max(negative);
        }
        streaks
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedStatistics {
    pub entry_count: usize,
    pub mood: SeriesStats,
    pub energy: SeriesStats,
    pub streaks: Streaks,
    /// Mean absolute mood change between neighbours; `None` for one entry
    pub volatility: Option<f64>,
    pub time_span_days: i64,
}

/// `None` for an empty collection.
pub fn detailed_statistics(entries: &[Entry]) -> Option<DetailedStatistics> {
    let moods: Vec<f64> = entries.iter().map(Entry::mood_f64).collect();
    let energies: Vec<f64> = entries.iter().map(Entry::energy_f64).collect();

    Some(DetailedStatistics {
        entry_count: entries.len(),
        mood: SeriesStats::from_values(&moods)?,
        energy: SeriesStats::from_values(&energies)?,
        streaks: Streaks::from_entries(entries),
        volatility: Volatility::from_entries(entries).map(|v| v.mean),
        time_span_days: time_span_days(entries),
    })
}

pub struct SummaryAnalyzer;

impl SummaryAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SummaryAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for SummaryAnalyzer {
    fn name(&self) -> &str {
        "core.summary"
    }

    fn min_entries(&self) -> usize {
        MIN_ENTRIES
    }

    fn analyze(&self, entries: &[Entry], _ctx: &mut AnalyticsContext) -> Vec<Insight> {
        detailed_statistics(entries)
            .map(Insight::Statistics)
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testutil::{daily_entries, flat_entries};

    #[test]
    fn test_empty_has_no_statistics() {
        assert!(detailed_statistics(&[]).is_none());
    }

    #[test]
    fn test_single_entry() {
        let stats = detailed_statistics(&flat_entries(1, 7, 3)).unwrap();
        assert_eq!(stats.mood.mean, 7.0);
        assert_eq!(stats.mood.median, 7.0);
        assert_eq!(stats.energy.std_dev, 0.0);
        assert_eq!(stats.volatility, None);
        assert_eq!(stats.time_span_days, 0);
        assert_eq!(stats.streaks.longest_positive, 1);
    }

    #[test]
    fn test_series_stats() {
        let entries = daily_entries(&[(2, 5, ""), (8, 5, ""), (4, 5, ""), (6, 5, "")]);
        let stats = detailed_statistics(&entries).unwrap();
        assert_eq!(stats.mood.mean, 5.0);
        // sorted 2 4 6 8, upper median
        assert_eq!(stats.mood.median, 6.0);
        assert_eq!(stats.mood.std_dev, 5.0_f64.sqrt());
        assert_eq!(stats.mood.min, 2.0);
        assert_eq!(stats.mood.max, 8.0);
        assert_eq!(stats.time_span_days, 3);
        // changes 6, 4, 2
        assert_eq!(stats.volatility, Some(4.0));
    }

    #[test]
    fn test_streaks_follow_given_order() {
        let entries = daily_entries(&[
            (7, 5, ""),
            (6, 5, ""),
            (9, 5, ""),
            (5, 5, ""),
            (3, 5, ""),
            (4, 5, ""),
            (8, 5, ""),
            (1, 5, ""),
        ]);
        let streaks = Streaks::from_entries(&entries);
        assert_eq!(streaks.longest_positive, 3);
        assert_eq!(streaks.longest_negative, 2);
    }
}
