//! Smart interventions
//!
//! When the current mood drops more than two points below the mean of the
//! 7 most recent entries (by position), suggest a few concrete actions.
//! The social suggestion names the tag that lifts mood most in this journal.

use serde::Serialize;

use crate::analytics::engine::{AnalyticsContext, Analyzer};
use crate::analytics::insight::Insight;
use crate::analytics::stats;
use crate::analytics::tags::{tag_impacts, ImpactDirection};
use crate::types::Entry;

/// The analyzer reads the newest entry as the current mood.
pub const MIN_ENTRIES: usize = 1;

/// Entries averaged for the recent baseline.
pub const BASELINE_WINDOW: usize = 7;

/// Points below the baseline before suggestions appear.
pub const MOOD_DROP: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionTiming {
    Immediate,
    Scheduled,
    Social,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionConfidence {
    High,
    Medium,
}

impl InterventionConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionConfidence::High => "high",
            InterventionConfidence::Medium => "medium",
        }
    }
}

/// One suggested action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intervention {
    pub timing: InterventionTiming,
    pub text: String,
    pub confidence: InterventionConfidence,
    /// Recent baseline the current mood was compared against
    pub baseline_mood: f64,
}

/// Suggestions for `current_mood` against the first [`BASELINE_WINDOW`]
/// entries. Empty when the window is empty or the mood is not low enough.
pub fn interventions(entries: &[Entry], current_mood: f64) -> Vec<Intervention> {
    let window = &entries[..entries.len().min(BASELINE_WINDOW)];
    let moods: Vec<f64> = window.iter().map(Entry::mood_f64).collect();
    let Some(baseline) = stats::mean(&moods) else {
        return Vec::new();
    };
    if current_mood >= baseline - MOOD_DROP {
        return Vec::new();
    }

    let suggestion = |timing, text: String, confidence| Intervention {
        timing,
        text,
        confidence,
        baseline_mood: baseline,
    };

    let social = match strongest_boost(entries) {
        Some((tag, impact)) => suggestion(
            InterventionTiming::Social,
            format!("Your data shows {} boosts mood {:+.1} points", tag, impact),
            InterventionConfidence::High,
        ),
        None => suggestion(
            InterventionTiming::Social,
            "Reach out to someone you trust today".to_string(),
            InterventionConfidence::Medium,
        ),
    };

    vec![
        suggestion(
            InterventionTiming::Immediate,
            "Take 5 deep breaths".to_string(),
            InterventionConfidence::High,
        ),
        suggestion(
            InterventionTiming::Scheduled,
            "Schedule 20min walk for tomorrow morning".to_string(),
            InterventionConfidence::Medium,
        ),
        social,
    ]
}

/// Tag with the largest positive mood impact over at least two entries.
fn strongest_boost(entries: &[Entry]) -> Option<(String, f64)> {
    tag_impacts(entries, 2)
        .into_iter()
        .filter(|impact| impact.direction == ImpactDirection::Boosts)
        .max_by(|a, b| a.mood_impact.total_cmp(&b.mood_impact))
        .map(|impact| (impact.tag, impact.mood_impact))
}

/// Analyzer wrapper for [`interventions`], using the newest entry's mood.
pub struct InterventionsAnalyzer;

impl InterventionsAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InterventionsAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for InterventionsAnalyzer {
    fn name(&self) -> &str {
        "core.interventions"
    }

    fn min_entries(&self) -> usize {
        MIN_ENTRIES
    }

    fn analyze(&self, entries: &[Entry], _ctx: &mut AnalyticsContext) -> Vec<Insight> {
        let Some(current) = entries.first() else {
            return Vec::new();
        };
        interventions(entries, current.mood_f64())
            .into_iter()
            .map(Insight::Intervention)
            .collect()
    }
}
