//! Weekly Outlook
//!
//! A day-by-day outlook for the coming week with risks, opportunities and
//! suggestions attached to each day.
//!
//! ## Prediction
//!
//! ```text
//! base      = weekday mean (overall mean when the weekday is unrecorded)
//! predicted = base + recent_trend · (days_ahead / 7) + cyclical_deviation(weekday)
//! ```
//!
//! The same adjustment is applied to mood and energy. Confidence is
//! `min(0.9, 0.15 · weekday_count + 0.3)`.
//!
//! Risks and opportunities are judged on the rounded prediction and look
//! at the 14 most recent entries; each list keeps at most two distinct
//! messages.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::analytics::engine::{AnalyticsContext, Analyzer};
use crate::analytics::insight::Insight;
use crate::analytics::stats::{percent, round1};
use crate::analytics::temporal::{recent_trend, WeekdayProfile};
use crate::types::{clamp_score, day_name, weekday_index, Entry};

use super::forecast::horizon;

/// Entries needed before an outlook is produced.
pub const MIN_ENTRIES: usize = 7;

const TREND_WINDOW: usize = 5;
const RECENT_WINDOW: usize = 14;
const MAX_NOTES: usize = 2;

const STRESS_TAGS: &[&str] = &["stress", "deadline", "conflict", "overwhelm", "poor-sleep"];
const POSITIVE_TAGS: &[&str] = &["productive", "creative", "flow", "social", "exercise", "hobby"];

/// One day of the outlook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlookDay {
    pub date: NaiveDate,
    pub day_name: String,
    pub mood: f64,
    pub energy: f64,
    /// Whole percent
    pub confidence: u8,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Outlook for the `days` days after `as_of`. Empty below [`MIN_ENTRIES`].
pub fn weekly_outlook(entries: &[Entry], as_of: NaiveDate, days: u32) -> Vec<OutlookDay> {
    if entries.len() < MIN_ENTRIES {
        return Vec::new();
    }
    let Some(profile) = WeekdayProfile::from_entries(entries) else {
        return Vec::new();
    };
    let trend = recent_trend(entries, TREND_WINDOW);
    let recent = &entries[..entries.len().min(RECENT_WINDOW)];

    horizon(as_of, days)
        .map(|(i, date)| {
            let day = weekday_index(date.weekday());
            let bucket = profile.bucket(day);
            let adjustment = trend * (i as f64 / 7.0) + profile.cyclical_deviation(day);

            let mood = round1(clamp_score(
                bucket.mean_mood().unwrap_or(profile.overall_mood()) + adjustment,
            ));
            let energy = round1(clamp_score(
                bucket.mean_energy().unwrap_or(profile.overall_energy()) + adjustment,
            ));
            let confidence = (0.15 * bucket.count as f64 + 0.3).min(0.9);
            let name = day_name(day);

            OutlookDay {
                date,
                day_name: name.to_string(),
                mood,
                energy,
                confidence: percent(confidence),
                risks: risks(mood, energy, recent),
                opportunities: opportunities(mood, energy, recent),
                suggestions: suggestions(mood, energy, name),
            }
        })
        .collect()
}

fn matches_any(tag: &str, vocabulary: &[&str]) -> bool {
    vocabulary.iter().any(|v| tag.eq_ignore_ascii_case(v))
}

/// Keep the first [`MAX_NOTES`] distinct messages.
fn distinct(messages: Vec<String>) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();
    for message in messages {
        if kept.len() == MAX_NOTES {
            break;
        }
        if !kept.contains(&message) {
            kept.push(message);
        }
    }
    kept
}

fn risks(mood: f64, energy: f64, recent: &[Entry]) -> Vec<String> {
    let mut risks = Vec::new();
    if mood < 5.0 {
        risks.push("Predicted low mood - vulnerability window.".to_string());
    }
    if energy < 4.0 {
        risks.push("Low energy predicted - risk of burnout.".to_string());
    }
    let stressed = recent
        .iter()
        .any(|e| e.tags.iter().any(|t| matches_any(t, STRESS_TAGS)));
    if stressed && (mood < 6.0 || energy < 5.0) {
        risks.push("Recent stressors may impact predicted state.".to_string());
    }
    distinct(risks)
}

fn opportunities(mood: f64, energy: f64, recent: &[Entry]) -> Vec<String> {
    let mut found = Vec::new();
    if mood >= 7.0 || energy >= 7.0 {
        for entry in recent {
            if entry.mood >= 7 && entry.energy >= 7 {
                found.push(format!(
                    "Recall positive factors from {}.",
                    entry.timestamp.format("%b %-d")
                ));
            }
            let positive: Vec<&str> = entry
                .unique_tags()
                .into_iter()
                .filter(|t| matches_any(t, POSITIVE_TAGS))
                .collect();
            if !positive.is_empty() {
                found.push(format!("Tap into past {} activities.", positive.join("/")));
            }
        }
    }
    if mood >= 7.0 {
        found.push("High mood predicted - good for engaging tasks.".to_string());
    }
    if energy >= 7.0 {
        found.push("High energy window - ideal for physical activities.".to_string());
    }
    distinct(found)
}

fn suggestions(mood: f64, energy: f64, day_name: &str) -> Vec<String> {
    let mut out: Vec<&str> = Vec::new();
    if mood < 5.0 {
        out.extend(["Schedule gentle self-care activities", "Avoid making important decisions"]);
    } else if mood >= 7.0 {
        out.extend([
            "Perfect day for tackling challenging projects",
            "Schedule important conversations or meetings",
        ]);
    }
    if energy < 4.0 {
        out.extend(["Plan rest and recovery activities", "Avoid overscheduling"]);
    } else if energy >= 7.0 {
        out.extend([
            "Great day for exercise or physical activities",
            "Take on energy-demanding tasks",
        ]);
    }
    match day_name {
        "Monday" => out.push("Ease into the week with manageable goals"),
        "Friday" => out.push("Wrap up loose ends and celebrate progress"),
        _ => {}
    }
    out.into_iter().map(String::from).collect()
}

/// Analyzer wrapper for [`weekly_outlook`].
pub struct OutlookAnalyzer;

impl OutlookAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OutlookAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for OutlookAnalyzer {
    fn name(&self) -> &str {
        "core.outlook"
    }

    fn min_entries(&self) -> usize {
        MIN_ENTRIES
    }

    fn analyze(&self, entries: &[Entry], ctx: &mut AnalyticsContext) -> Vec<Insight> {
        weekly_outlook(entries, ctx.as_of, ctx.config.outlook_days)
            .into_iter()
            .map(Insight::Outlook)
            .collect()
    }
}
