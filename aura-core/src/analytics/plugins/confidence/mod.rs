//! Pattern Confidence Scorer
//!
//! Assigns each candidate pattern a confidence in `[0, 1]` that blends its
//! statistical strength with how much data backs it. Every model has its own
//! ceiling and floor; a candidate at or under its floor is dropped.
//!
//! ## Models
//!
//! With `n` entries and `span` days between the first and last timestamp:
//!
//! | Pattern | Confidence | Cap | Floor |
//! |---------|------------|-----|-------|
//! | Mood-energy sync | `|r| · min(n/14,1) · min(span/21,1)` | 0.95 | 0.3 |
//! | Weekly rhythm | `base(var) · coverage · min(⌊n/7⌋/3,1)` | 0.9 | 0.2 |
//! | Tag impact (≥3 entries, top 3) | `min(c/10,1)·0.7 + |Δ|/5·0.2 + consistency·0.1` | 0.85 | 0.25 |
//! | Trend direction | `|Δ₇| / 5 · min(n/14,1) · min(span/21,1)` | 0.8 | 0.25 |
//! | Volatility | `min(n/14,1)·0.8 + 0.2 if avg change > 2` | 0.75 | 0.3 |
//!
//! `base(var)` is 0.8 above 1.5, 0.6 above 1, otherwise 0.3, where `var` is
//! the variance of the weekday mood averages over recorded weekdays.
//! Reliability is classified on the capped confidence.

use serde::Serialize;

use crate::analytics::engine::{AnalyticsContext, Analyzer};
use crate::analytics::insight::Insight;
use crate::analytics::stats;
use crate::analytics::tags::{tag_impacts, ImpactDirection};
use crate::analytics::temporal::{self, Volatility, WeekdayProfile};
use crate::types::{day_name, Entry};

/// Entries needed before any confidence score is produced.
pub const MIN_ENTRIES: usize = 7;

const FULL_DATA_ENTRIES: f64 = 14.0;
const FULL_SPAN_DAYS: f64 = 21.0;
const TREND_WINDOW: usize = 7;
const TAG_MIN_COUNT: usize = 3;
const MAX_TAG_SCORES: usize = 3;

/// Fixed step classification of a confidence value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl Reliability {
    /// ≥0.8 excellent, ≥0.6 good, ≥0.4 moderate, else poor.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            Reliability::Excellent
        } else if confidence >= 0.6 {
            Reliability::Good
        } else if confidence >= 0.4 {
            Reliability::Moderate
        } else {
            Reliability::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Reliability::Excellent => "excellent",
            Reliability::Good => "good",
            Reliability::Moderate => "moderate",
            Reliability::Poor => "poor",
        }
    }
}

/// How far to trust one detected pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceScore {
    pub pattern: String,
    /// 0-1, already capped
    pub confidence: f64,
    pub data_points: usize,
    pub reliability: Reliability,
    pub description: String,
    pub factors: Vec<String>,
    pub timeframe: String,
}

impl ConfidenceScore {
    fn new(
        pattern: impl Into<String>,
        raw_confidence: f64,
        cap: f64,
        data_points: usize,
        description: String,
        factors: Vec<String>,
        timeframe: String,
    ) -> Self {
        let confidence = raw_confidence.clamp(0.0, cap);
        Self {
            pattern: pattern.into(),
            confidence,
            data_points,
            reliability: Reliability::from_confidence(confidence),
            description,
            factors,
            timeframe,
        }
    }
}

/// Confidence scores, highest first, at most `limit`. Empty below
/// [`MIN_ENTRIES`].
pub fn confidence_scores(entries: &[Entry], limit: usize) -> Vec<ConfidenceScore> {
    if entries.len() < MIN_ENTRIES {
        return Vec::new();
    }

    let mut scores = Vec::new();
    scores.extend(mood_energy_confidence(entries).filter(|s| s.confidence > 0.3));
    scores.extend(weekly_rhythm_confidence(entries).filter(|s| s.confidence > 0.2));
    scores.extend(tag_impact_confidence(entries));
    scores.extend(trend_confidence(entries).filter(|s| s.confidence > 0.25));
    scores.extend(volatility_confidence(entries).filter(|s| s.confidence > 0.3));

    scores.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    scores.truncate(limit);
    scores
}

fn data_factor(n: usize) -> f64 {
    (n as f64 / FULL_DATA_ENTRIES).min(1.0)
}

fn span_factor(span_days: i64) -> f64 {
    (span_days as f64 / FULL_SPAN_DAYS).min(1.0)
}

fn mood_energy_confidence(entries: &[Entry]) -> Option<ConfidenceScore> {
    let moods: Vec<f64> = entries.iter().map(Entry::mood_f64).collect();
    let energies: Vec<f64> = entries.iter().map(Entry::energy_f64).collect();
    let r = stats::pearson(&moods, &energies);
    let n = entries.len();
    let span = temporal::time_span_days(entries);

    let raw = r.abs() * data_factor(n) * span_factor(span);
    let label = if r.abs() > 0.7 {
        "strong"
    } else if r.abs() > 0.4 {
        "moderate"
    } else {
        "weak"
    };

    Some(ConfidenceScore::new(
        "Mood-Energy Synchronization",
        raw,
        0.95,
        n,
        format!(
            "Your mood and energy levels show {} correlation (r={:.2})",
            label, r
        ),
        vec![
            format!("{} data points", n),
            format!("{} day timespan", span),
            format!("Correlation strength: {:.2}", r.abs()),
        ],
        format!("{} days", span),
    ))
}

fn weekly_rhythm_confidence(entries: &[Entry]) -> Option<ConfidenceScore> {
    let profile = WeekdayProfile::from_entries(entries)?;
    let day_means: Vec<f64> = profile.mood_means().into_iter().map(|(_, m)| m).collect();
    let variance = stats::variance(&day_means)?;
    let coverage = profile.coverage();
    let weeks = entries.len() / 7;

    let base = if variance > 1.5 {
        0.8
    } else if variance > 1.0 {
        0.6
    } else {
        0.3
    };
    let raw = base * coverage * (weeks as f64 / 3.0).min(1.0);

    let (best, _) = profile.best_day()?;
    let (worst, _) = profile.worst_day()?;

    Some(ConfidenceScore::new(
        "Weekly Rhythm Pattern",
        raw,
        0.9,
        entries.len(),
        format!(
            "Your mood peaks on {} and dips on {} with {:.1} variance",
            day_name(best),
            day_name(worst),
            variance
        ),
        vec![
            format!("{}% day coverage", stats::percent(coverage)),
            format!("{} weeks of data", weeks),
            format!("Mood variance: {:.2}", variance),
        ],
        format!("{} weeks", weeks),
    ))
}

fn tag_impact_confidence(entries: &[Entry]) -> Vec<ConfidenceScore> {
    let mut scores: Vec<ConfidenceScore> = tag_impacts(entries, TAG_MIN_COUNT)
        .into_iter()
        .map(|impact| {
            let avg = impact.mood_impact;
            let consistency = (1.0 - impact.mood_spread() / (avg + 0.1).abs()).max(0.0);
            let raw = (impact.count as f64 / 10.0).min(1.0) * 0.7
                + avg.abs() / 5.0 * 0.2
                + consistency * 0.1;
            let verb = match impact.direction {
                ImpactDirection::Boosts => "boosts",
                _ => "lowers",
            };

            ConfidenceScore::new(
                format!("\"{}\" Impact Pattern", impact.tag),
                raw,
                0.85,
                impact.count,
                format!(
                    "\"{}\" {} mood by {:.1} points on average",
                    impact.tag,
                    verb,
                    avg.abs()
                ),
                vec![
                    format!("{} occurrences", impact.count),
                    format!("Impact: {:+.2}", avg),
                    format!("Consistency: {:.2}", consistency),
                ],
                format!("{} instances", impact.count),
            )
        })
        .filter(|s| s.confidence > 0.25)
        .collect();

    scores.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    scores.truncate(MAX_TAG_SCORES);
    scores
}

fn trend_confidence(entries: &[Entry]) -> Option<ConfidenceScore> {
    let n = entries.len();
    if n < TREND_WINDOW {
        return None;
    }
    let recent = temporal::mean_mood(&entries[..TREND_WINDOW])?;
    let older = temporal::mean_mood(&entries[n - TREND_WINDOW..])?;
    let delta = (recent - older).abs();
    let span = temporal::time_span_days(entries);

    let raw = delta / 5.0 * data_factor(n) * span_factor(span);
    let (direction, change) = if recent > older {
        ("Improving", "increase")
    } else {
        ("Declining", "decrease")
    };

    Some(ConfidenceScore::new(
        "Mood Trend Direction",
        raw,
        0.8,
        n,
        format!(
            "{} trend with {:.1} point {}",
            direction, delta, change
        ),
        vec![
            format!("{} data points", n),
            format!("{} day span", span),
            format!("Trend strength: {:.2}", delta),
        ],
        format!("{} days", span),
    ))
}

fn volatility_confidence(entries: &[Entry]) -> Option<ConfidenceScore> {
    let volatility = Volatility::from_entries(entries)?;
    let bonus = if volatility.mean > 2.0 { 0.2 } else { 0.0 };
    let raw = data_factor(entries.len()) * 0.8 + bonus;

    Some(ConfidenceScore::new(
        "Emotional Volatility Pattern",
        raw,
        0.75,
        volatility.transitions,
        format!(
            "{} emotional volatility ({:.1} avg daily change)",
            volatility.label(),
            volatility.mean
        ),
        vec![
            format!("{} day-to-day changes", volatility.transitions),
            format!("Average volatility: {:.2}", volatility.mean),
            format!("Standard deviation: {:.2}", volatility.std_dev),
        ],
        format!("{} transitions", volatility.transitions),
    ))
}

/// Analyzer wrapper for [`confidence_scores`].
pub struct ConfidenceAnalyzer;

impl ConfidenceAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConfidenceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for ConfidenceAnalyzer {
    fn name(&self) -> &str {
        "core.confidence"
    }

    fn min_entries(&self) -> usize {
        MIN_ENTRIES
    }

    fn analyze(&self, entries: &[Entry], ctx: &mut AnalyticsContext) -> Vec<Insight> {
        confidence_scores(entries, ctx.config.max_confidence_scores)
            .into_iter()
            .map(Insight::Confidence)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testutil::{daily_entries, flat_entries};

    fn patterns(scores: &[ConfidenceScore]) -> Vec<&str> {
        scores.iter().map(|s| s.pattern.as_str()).collect()
    }

    #[test]
    fn test_reliability_steps() {
        assert_eq!(Reliability::from_confidence(0.81), Reliability::Excellent);
        assert_eq!(Reliability::from_confidence(0.8), Reliability::Excellent);
        assert_eq!(Reliability::from_confidence(0.6), Reliability::Good);
        assert_eq!(Reliability::from_confidence(0.59), Reliability::Moderate);
        assert_eq!(Reliability::from_confidence(0.4), Reliability::Moderate);
        assert_eq!(Reliability::from_confidence(0.39), Reliability::Poor);
    }

    #[test]
    fn test_threshold_boundary() {
        assert!(confidence_scores(&flat_entries(6, 5, 5), 6).is_empty());
        assert!(!confidence_scores(&flat_entries(7, 5, 5), 6).is_empty());
    }

    #[test]
    fn test_identical_week_drops_weekly_rhythm() {
        // Seven identical entries on seven different weekdays
        let entries = flat_entries(7, 5, 5);
        let scores = confidence_scores(&entries, 6);

        let weekly = weekly_rhythm_confidence(&entries).unwrap();
        assert!((weekly.confidence - 0.1).abs() < 1e-9);
        assert!(!patterns(&scores).contains(&"Weekly Rhythm Pattern"));

        // Only volatility clears its floor: 7/14 * 0.8
        assert_eq!(patterns(&scores), vec!["Emotional Volatility Pattern"]);
        assert!((scores[0].confidence - 0.4).abs() < 1e-9);
        assert_eq!(scores[0].reliability, Reliability::Moderate);
    }

    #[test]
    fn test_strong_sync_over_three_weeks() {
        let mut specs = Vec::new();
        for i in 0..21 {
            let v = if i % 2 == 0 { 8 } else { 3 };
            specs.push((v, v, ""));
        }
        let entries = daily_entries(&specs);
        let scores = confidence_scores(&entries, 6);

        let sync = scores
            .iter()
            .find(|s| s.pattern == "Mood-Energy Synchronization")
            .unwrap();
        // r = 1 and full data; span 20/21 lands just above the 0.95 cap
        assert_eq!(sync.confidence, 0.95);
        assert_eq!(sync.reliability, Reliability::Excellent);

        let volatility = scores
            .iter()
            .find(|s| s.pattern == "Emotional Volatility Pattern")
            .unwrap();
        assert_eq!(volatility.confidence, 0.75);
        assert_eq!(volatility.data_points, 20);

        for pair in scores.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(&s.confidence)));
    }

    #[test]
    fn test_tag_scores_need_three_occurrences() {
        let entries = daily_entries(&[
            (9, 5, "walk"),
            (4, 5, ""),
            (9, 5, "walk"),
            (4, 5, "rain"),
            (9, 5, "walk"),
            (4, 5, "rain"),
            (4, 5, ""),
        ]);
        let scores = tag_impact_confidence(&entries);
        assert_eq!(patterns(&scores), vec!["\"walk\" Impact Pattern"]);

        let walk = &scores[0];
        assert_eq!(walk.data_points, 3);
        assert!(walk.description.starts_with("\"walk\" boosts mood by"));
        // 0.21 + |Δ|/5*0.2 + consistency (spread is zero) 0.1
        let delta = 9.0 - 43.0 / 7.0;
        let expected = 0.3 * 0.7 + delta / 5.0 * 0.2 + 0.1;
        assert!((walk.confidence - expected).abs() < 1e-9);
    }

    #[test]
    fn test_trend_compares_leading_and_trailing_windows() {
        let mut specs = vec![(8, 5, ""); 7];
        specs.extend(vec![(3, 5, ""); 7]);
        let entries = daily_entries(&specs);
        let trend = trend_confidence(&entries).unwrap();
        assert!(trend.description.starts_with("Improving trend with 5.0 point increase"));
        // delta 5 → 1.0 · 14/14 · 13/21
        assert!((trend.confidence - 0.8f64.min(13.0 / 21.0)).abs() < 1e-9);
    }
}
