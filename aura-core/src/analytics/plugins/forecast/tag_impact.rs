//! Tag impact model: recent recurring tags are assumed to recur, and their
//! attributed impacts are added onto a recent baseline.

use chrono::NaiveDate;

use super::{horizon, DayPrediction, ForecastKind, ForecastModel};
use crate::analytics::tags::{recurring_tags, tag_impacts, TagImpact};
use crate::analytics::temporal::{mean_energy, mean_mood};
use crate::types::Entry;

const IMPACT_MIN_COUNT: usize = 2;
const RECENT_WINDOW: usize = 14;
const RECUR_MIN_COUNT: usize = 2;
const RECUR_LIMIT: usize = 3;
const BASELINE_WINDOW: usize = 7;

pub fn tag_impact_model(entries: &[Entry], as_of: NaiveDate, days: u32) -> Option<ForecastModel> {
    let baseline = &entries[..entries.len().min(BASELINE_WINDOW)];
    let baseline_mood = mean_mood(baseline)?;
    let baseline_energy = mean_energy(baseline)?;

    let impacts = tag_impacts(entries, IMPACT_MIN_COUNT);
    let expected: Vec<&TagImpact> = recurring_tags(entries, RECENT_WINDOW, RECUR_MIN_COUNT, RECUR_LIMIT)
        .iter()
        .filter_map(|tag| impacts.iter().find(|i| &i.tag == tag))
        .collect();

    let mood_adjustment: f64 = expected.iter().map(|i| i.mood_impact).sum();
    let energy_adjustment: f64 = expected.iter().map(|i| i.energy_impact).sum();
    let reasoning = if expected.is_empty() {
        "Baseline prediction".to_string()
    } else {
        expected
            .iter()
            .map(|i| format!("{}: {:+.1} mood", i.tag, i.mood_impact))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let significant = impacts.len() as f64;
    let day_confidence = (significant / 10.0 * 0.8).min(0.8);
    let accuracy = (significant / 15.0 * 0.8).min(0.8);

    let mood = baseline_mood + mood_adjustment;
    let predictions = horizon(as_of, days)
        .map(|(_, date)| {
            DayPrediction::new(
                date,
                mood,
                baseline_energy + energy_adjustment,
                day_confidence,
                reasoning.clone(),
            )
            .with_risk(mood < 5.0, "Tag patterns suggest challenging period")
            .with_opportunity(mood > 7.0, "Positive tag patterns expected")
        })
        .collect();

    let top_positive = impacts
        .iter()
        .max_by(|a, b| a.mood_impact.total_cmp(&b.mood_impact))
        .map_or("None", |i| i.tag.as_str());
    let top_negative = impacts
        .iter()
        .min_by(|a, b| a.mood_impact.total_cmp(&b.mood_impact))
        .map_or("None", |i| i.tag.as_str());

    Some(ForecastModel::new(
        "Tag Impact Forecast",
        ForecastKind::PatternBased,
        accuracy,
        "Forecasts based on your personal tag patterns and their emotional impacts".to_string(),
        predictions,
        vec![
            format!("{} significant tags analyzed", impacts.len()),
            format!("Top positive tag: {}", top_positive),
            format!("Top negative tag: {}", top_negative),
            format!("Pattern recognition confidence: {:.0}%", accuracy * 100.0),
        ],
    ))
}
