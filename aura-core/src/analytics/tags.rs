//! Tag attribution
//!
//! For each tag, the mean deviation of mood and energy from the all-entries
//! baseline on the entries that carry it. A tag repeated inside one entry
//! counts once for that entry.

use serde::Serialize;

use super::stats;
use crate::types::Entry;

/// Which way a tag moves mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactDirection {
    Boosts,
    Lowers,
    Neutral,
}

impl ImpactDirection {
    fn from_deviation(value: f64) -> Self {
        if value > 0.0 {
            ImpactDirection::Boosts
        } else if value < 0.0 {
            ImpactDirection::Lowers
        } else {
            ImpactDirection::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactDirection::Boosts => "boosts",
            ImpactDirection::Lowers => "lowers",
            ImpactDirection::Neutral => "leaves unchanged",
        }
    }
}

/// Attributed effect of one tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagImpact {
    pub tag: String,
    /// Entries carrying the tag
    pub count: usize,
    /// Mean mood deviation from the baseline
    pub mood_impact: f64,
    /// Mean energy deviation from the baseline
    pub energy_impact: f64,
    pub direction: ImpactDirection,
    /// Per-entry mood deviations, in input order
    #[serde(skip)]
    pub mood_deviations: Vec<f64>,
}

impl TagImpact {
    /// Spread of the per-entry mood deviations.
    pub fn mood_spread(&self) -> f64 {
        stats::std_dev(&self.mood_deviations).unwrap_or(0.0)
    }
}

/// Tag impacts for every tag seen on at least `min_count` entries.
///
/// Output follows the order in which tags first appear in `entries`.
pub fn tag_impacts(entries: &[Entry], min_count: usize) -> Vec<TagImpact> {
    let moods: Vec<f64> = entries.iter().map(Entry::mood_f64).collect();
    let energies: Vec<f64> = entries.iter().map(Entry::energy_f64).collect();
    let (Some(mood_baseline), Some(energy_baseline)) = (stats::mean(&moods), stats::mean(&energies))
    else {
        return Vec::new();
    };

    // (tag, mood deviations, energy deviations)
    let mut acc: Vec<(String, Vec<f64>, Vec<f64>)> = Vec::new();
    for entry in entries {
        let mood_dev = entry.mood_f64() - mood_baseline;
        let energy_dev = entry.energy_f64() - energy_baseline;
        for tag in entry.unique_tags() {
            match acc.iter_mut().find(|(t, _, _)| t == tag) {
                Some((_, m, e)) => {
                    m.push(mood_dev);
                    e.push(energy_dev);
                }
                None => acc.push((tag.to_string(), vec![mood_dev], vec![energy_dev])),
            }
        }
    }

    acc.into_iter()
        .filter(|(_, m, _)| m.len() >= min_count.max(1))
        .map(|(tag, mood_devs, energy_devs)| {
            let mood_impact = stats::mean(&mood_devs).unwrap_or(0.0);
            let energy_impact = stats::mean(&energy_devs).unwrap_or(0.0);
            TagImpact {
                tag,
                count: mood_devs.len(),
                mood_impact,
                energy_impact,
                direction: ImpactDirection::from_deviation(mood_impact),
                mood_deviations: mood_devs,
            }
        })
        .collect()
}

/// How many entries carry each tag, in first-appearance order.
pub fn tag_frequencies(entries: &[Entry]) -> Vec<(String, usize)> {
    let mut freq: Vec<(String, usize)> = Vec::new();
    for entry in entries {
        for tag in entry.unique_tags() {
            match freq.iter_mut().find(|(t, _)| t == tag) {
                Some((_, count)) => *count += 1,
                None => freq.push((tag.to_string(), 1)),
            }
        }
    }
    freq
}

/// The `k` most frequent tags. Ties keep first-appearance order.
pub fn top_tags(entries: &[Entry], k: usize) -> Vec<String> {
    let mut freq = tag_frequencies(entries);
    freq.sort_by(|a, b| b.1.cmp(&a.1));
    freq.into_iter().take(k).map(|(tag, _)| tag).collect()
}

/// Tags seen on at least `min_count` of the first `window` entries, most
/// frequent first, at most `limit` of them.
pub fn recurring_tags(entries: &[Entry], window: usize, min_count: usize, limit: usize) -> Vec<String> {
    let recent = &entries[..entries.len().min(window)];
    let mut freq = tag_frequencies(recent);
    freq.retain(|(_, count)| *count >= min_count);
    freq.sort_by(|a, b| b.1.cmp(&a.1));
    freq.into_iter().take(limit).map(|(tag, _)| tag).collect()
}
