//! Pattern Strength Analyzer
//!
//! Ranks the strongest recurring patterns on a 0-10 scale, each with a
//! short piece of advice.
//!
//! ## Candidate patterns
//!
//! | Pattern | Kept when | Strength |
//! |---------|-----------|----------|
//! | Mood-energy sync | `|r| > 0.3` | `|r| × 10` |
//! | Tag impact (≥2 entries) | strength `> 2` | `min(|Δmood| × 2, 10)` |
//! | Weekly rhythm | best - worst weekday `> 1.5` | `min(diff × 2, 10)` |

use serde::Serialize;

use crate::analytics::engine::{AnalyticsContext, Analyzer};
use crate::analytics::insight::Insight;
use crate::analytics::stats;
use crate::analytics::tags::{tag_impacts, ImpactDirection};
use crate::analytics::temporal::WeekdayProfile;
use crate::types::{day_name, Entry};

/// Entries needed before any pattern is reported.
pub const MIN_ENTRIES: usize = 5;

const SYNC_THRESHOLD: f64 = 0.3;
const TAG_MIN_COUNT: usize = 2;
const TAG_MIN_STRENGTH: f64 = 2.0;
const RHYTHM_MIN_SPREAD: f64 = 1.5;
const MAX_STRENGTH: f64 = 10.0;

/// Qualitative certainty attached to a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternLevel {
    High,
    Medium,
    Low,
}

impl PatternLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternLevel::High => "high",
            PatternLevel::Medium => "medium",
            PatternLevel::Low => "low",
        }
    }
}

/// A detected pattern with its strength.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternInsight {
    pub name: String,
    /// 0-10
    pub strength: f64,
    pub level: PatternLevel,
    pub description: String,
    pub actionable: String,
}

/// Strongest patterns first, at most `limit`. Empty below [`MIN_ENTRIES`].
pub fn pattern_strengths(entries: &[Entry], limit: usize) -> Vec<PatternInsight> {
    if entries.len() < MIN_ENTRIES {
        return Vec::new();
    }

    let mut patterns = Vec::new();
    patterns.extend(mood_energy_sync(entries));
    patterns.extend(tag_influence(entries));
    patterns.extend(weekly_rhythm(entries));

    patterns.sort_by(|a, b| b.strength.total_cmp(&a.strength));
    patterns.truncate(limit);
    patterns
}

fn mood_energy_sync(entries: &[Entry]) -> Option<PatternInsight> {
    let moods: Vec<f64> = entries.iter().map(Entry::mood_f64).collect();
    let energies: Vec<f64> = entries.iter().map(Entry::energy_f64).collect();
    let r = stats::pearson(&moods, &energies);
    let strength = r.abs();
    if strength <= SYNC_THRESHOLD {
        return None;
    }

    let level = if strength > 0.7 {
        PatternLevel::High
    } else if strength > 0.5 {
        PatternLevel::Medium
    } else {
        PatternLevel::Low
    };
    let description = if r > 0.7 {
        "Strong positive sync between mood and energy"
    } else if r > SYNC_THRESHOLD {
        "Moderate connection between mood and energy"
    } else {
        "Mood and energy tend to move in opposite directions"
    };

    Some(PatternInsight {
        name: "Mood-Energy Sync".to_string(),
        strength: strength * MAX_STRENGTH,
        level,
        description: description.to_string(),
        actionable: "When you boost energy, mood follows. Focus on energy-building activities during low periods.".to_string(),
    })
}

fn tag_influence(entries: &[Entry]) -> Vec<PatternInsight> {
    tag_impacts(entries, TAG_MIN_COUNT)
        .into_iter()
        .filter_map(|impact| {
            let strength = (impact.mood_impact.abs() * 2.0).min(MAX_STRENGTH);
            if strength <= TAG_MIN_STRENGTH {
                return None;
            }
            let level = if impact.count >= 4 {
                PatternLevel::High
            } else if impact.count >= 3 {
                PatternLevel::Medium
            } else {
                PatternLevel::Low
            };
            let tag = &impact.tag;
            let (description, actionable) = match impact.direction {
                ImpactDirection::Boosts => (
                    format!("\"{}\" consistently boosts your mood (+{:.1})", tag, impact.mood_impact),
                    format!("Schedule more \"{}\" activities when mood is low", tag),
                ),
                _ => (
                    format!("\"{}\" tends to lower your mood ({:.1})", tag, impact.mood_impact),
                    format!("Prepare coping strategies before \"{}\" events", tag),
                ),
            };
            Some(PatternInsight {
                name: format!("\"{}\" Impact", tag),
                strength,
                level,
                description,
                actionable,
            })
        })
        .collect()
}

fn weekly_rhythm(entries: &[Entry]) -> Option<PatternInsight> {
    let profile = WeekdayProfile::from_entries(entries)?;
    let (best, best_mood) = profile.best_day()?;
    let (worst, worst_mood) = profile.worst_day()?;
    let spread = best_mood - worst_mood;
    if spread <= RHYTHM_MIN_SPREAD {
        return None;
    }

    Some(PatternInsight {
        name: "Weekly Rhythm".to_string(),
        strength: (spread * 2.0).min(MAX_STRENGTH),
        level: PatternLevel::Medium,
        description: format!(
            "Your mood peaks on {} and dips on {}",
            day_name(best),
            day_name(worst)
        ),
        actionable: format!(
            "Plan important activities for {}, schedule self-care on {}",
            day_name(best),
            day_name(worst)
        ),
    })
}

/// Analyzer wrapper for [`pattern_strengths`].
pub struct PatternStrengthAnalyzer;

impl PatternStrengthAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PatternStrengthAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for PatternStrengthAnalyzer {
    fn name(&self) -> &str {
        "core.pattern_strength"
    }

    fn min_entries(&self) -> usize {
        MIN_ENTRIES
    }

    fn analyze(&self, entries: &[Entry], ctx: &mut AnalyticsContext) -> Vec<Insight> {
        pattern_strengths(entries, ctx.config.max_pattern_insights)
            .into_iter()
            .map(Insight::Pattern)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testutil::{daily_entries, entry_at, flat_entries};

    fn names(patterns: &[PatternInsight]) -> Vec<&str> {
        patterns.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_threshold_boundary() {
        let synced = [(9, 9, ""), (2, 2, ""), (8, 7, ""), (3, 3, ""), (7, 8, "")];
        assert!(pattern_strengths(&daily_entries(&synced[..4]), 4).is_empty());
        let patterns = pattern_strengths(&daily_entries(&synced), 4);
        assert!(names(&patterns).contains(&"Mood-Energy Sync"));
    }

    #[test]
    fn test_flat_entries_have_no_patterns() {
        assert!(pattern_strengths(&flat_entries(10, 5, 5), 4).is_empty());
    }

    #[test]
    fn test_tag_influence_and_ordering() {
        // mood mean 6, energy flat so only tags and weekdays can register
        let entries = daily_entries(&[
            (9, 5, "friends"),
            (3, 5, "deadline"),
            (9, 5, "friends"),
            (3, 5, "deadline"),
            (9, 5, "friends"),
            (3, 5, "deadline, once"),
        ]);
        let patterns = pattern_strengths(&entries, 4);

        let friends = patterns.iter().find(|p| p.name == "\"friends\" Impact").unwrap();
        assert!((friends.strength - 6.0).abs() < 1e-9);
        assert_eq!(friends.level, PatternLevel::Medium);
        assert!(friends.description.contains("boosts"));

        let deadline = patterns.iter().find(|p| p.name == "\"deadline\" Impact").unwrap();
        assert!(deadline.description.contains("lower"));
        assert!(patterns.iter().all(|p| p.name != "\"once\" Impact"));

        for pair in patterns.windows(2) {
            assert!(pair[0].strength >= pair[1].strength);
        }
        assert!(patterns.iter().all(|p| (0.0..=10.0).contains(&p.strength)));
    }

    #[test]
    fn test_weekly_rhythm_ignores_empty_days() {
        // Sundays great, Saturdays poor, only two weekdays recorded
        let entries = vec![
            entry_at("2024-03-31T10:00:00+00:00", 9, 5, ""),
            entry_at("2024-03-30T10:00:00+00:00", 4, 5, ""),
            entry_at("2024-03-24T10:00:00+00:00", 9, 5, ""),
            entry_at("2024-03-23T10:00:00+00:00", 4, 5, ""),
            entry_at("2024-03-17T10:00:00+00:00", 9, 5, ""),
        ];
        let patterns = pattern_strengths(&entries, 4);
        let rhythm = patterns.iter().find(|p| p.name == "Weekly Rhythm").unwrap();
        assert_eq!(rhythm.strength, 10.0);
        assert_eq!(
            rhythm.description,
            "Your mood peaks on Sunday and dips on Saturday"
        );
    }

    #[test]
    fn test_limit_caps_output() {
        let entries = daily_entries(&[
            (9, 9, "a"),
            (2, 2, "b"),
            (9, 9, "a"),
            (2, 2, "b"),
            (9, 9, "a"),
            (2, 2, "b"),
        ]);
        assert!(pattern_strengths(&entries, 4).len() > 2);
        assert_eq!(pattern_strengths(&entries, 2).len(), 2);
    }
}
