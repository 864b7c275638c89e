//! Weekly pattern model: each future day gets its weekday's historical mean.

use chrono::{Datelike, NaiveDate};

use super::{horizon, DayPrediction, ForecastKind, ForecastModel};
use crate::analytics::stats;
use crate::analytics::temporal::WeekdayProfile;
use crate::types::{day_name, weekday_index, Entry};

const MAX_ACCURACY: f64 = 0.9;
const MAX_DAY_CONFIDENCE: f64 = 0.9;

/// Predict from day-of-week averages.
///
/// Accuracy grows with how much the weekday means differ, over weekdays
/// that have entries. A weekday never recorded falls back to the overall
/// mean with zero confidence.
pub fn seasonal_model(entries: &[Entry], as_of: NaiveDate, days: u32) -> Option<ForecastModel> {
    let profile = WeekdayProfile::from_entries(entries)?;

    let mood_means: Vec<f64> = profile.mood_means().into_iter().map(|(_, m)| m).collect();
    let energy_means: Vec<f64> = profile.energy_means().into_iter().map(|(_, m)| m).collect();
    let mood_variance = stats::variance(&mood_means).unwrap_or(0.0);
    let energy_variance = stats::variance(&energy_means).unwrap_or(0.0);
    let accuracy = ((mood_variance + energy_variance) / 8.0).min(MAX_ACCURACY);

    let predictions = horizon(as_of, days)
        .map(|(_, date)| predict_day(&profile, date))
        .collect();

    let mut factors = vec![
        format!("Mood pattern variance: {:.2}", mood_variance),
        format!("Energy pattern variance: {:.2}", energy_variance),
    ];
    if let Some((best, _)) = profile.best_day() {
        factors.push(format!("Best day: {}", day_name(best)));
    }
    factors.push(format!(
        "{} avg entries per day type",
        (entries.len() as f64 / 7.0).round()
    ));

    Some(ForecastModel::new(
        "Weekly Pattern Forecast",
        ForecastKind::Seasonal,
        accuracy,
        "Predicts based on your weekly emotional rhythms and day-of-week patterns".to_string(),
        predictions,
        factors,
    ))
}

fn predict_day(profile: &WeekdayProfile, date: NaiveDate) -> DayPrediction {
    let day = weekday_index(date.weekday());
    let bucket = profile.bucket(day);
    let mood = bucket.mean_mood().unwrap_or(profile.overall_mood());
    let energy = bucket.mean_energy().unwrap_or(profile.overall_energy());
    let confidence = (bucket.count as f64 / 3.0 * 0.8).min(MAX_DAY_CONFIDENCE);
    let name = day_name(day);

    DayPrediction::new(
        date,
        mood,
        energy,
        confidence,
        format!("Based on {} historical {} entries", bucket.count, name),
    )
    .with_risk(mood < 5.0, format!("{}s tend to be challenging", name))
    .with_opportunity(mood > 7.0, format!("{}s are typically positive", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::stats::round1;
    use crate::analytics::testutil::{as_of, daily_entries, entry_at, flat_entries};

    #[test]
    fn test_first_day_matches_bucket_mean() {
        // 2024-04-01 is a Monday; Mondays in history: 25th and 18th
        let entries = vec![
            entry_at("2024-03-31T09:00:00+00:00", 6, 6, ""),
            entry_at("2024-03-25T09:00:00+00:00", 3, 4, ""),
            entry_at("2024-03-24T09:00:00+00:00", 8, 7, ""),
            entry_at("2024-03-18T09:00:00+00:00", 4, 4, ""),
            entry_at("2024-03-17T09:00:00+00:00", 9, 8, ""),
        ];
        let model = seasonal_model(&entries, as_of(), 7).unwrap();
        let first = &model.predictions[0];

        let profile = WeekdayProfile::from_entries(&entries).unwrap();
        let monday = profile.bucket(weekday_index(first.date.weekday()));
        assert_eq!(first.day_name, "Monday");
        assert_eq!(first.mood, round1(monday.mean_mood().unwrap()));
        assert_eq!(first.energy, round1(monday.mean_energy().unwrap()));
        assert_eq!(first.mood, 3.5);
        assert_eq!(first.confidence, 53);
        assert_eq!(first.risks, vec!["Mondays tend to be challenging".to_string()]);
    }

    #[test]
    fn test_empty_weekday_uses_overall_mean() {
        // only Sundays recorded
        let entries = vec![
            entry_at("2024-03-31T09:00:00+00:00", 8, 6, ""),
            entry_at("2024-03-24T09:00:00+00:00", 6, 4, ""),
        ];
        let model = seasonal_model(&entries, as_of(), 7).unwrap();
        let tuesday = &model.predictions[1];
        assert_eq!(tuesday.mood, 7.0);
        assert_eq!(tuesday.energy, 5.0);
        assert_eq!(tuesday.confidence, 0);

        // a single non-empty bucket has no spread
        assert_eq!(model.accuracy, 0.0);
    }

    #[test]
    fn test_flat_week_is_not_surfaced() {
        let model = seasonal_model(&flat_entries(7, 5, 5), as_of(), 14).unwrap();
        assert_eq!(model.accuracy, 0.0);
        assert!(!model.is_surfaced());
    }

    #[test]
    fn test_strong_rhythm_is_capped() {
        let specs: Vec<(i64, i64, &str)> = (0..14)
            .map(|i| if i % 7 == 0 { (10, 10, "") } else { (1, 1, "") })
            .collect();
        let model = seasonal_model(&daily_entries(&specs), as_of(), 14).unwrap();
        // variance of [10, 1, 1, 1, 1, 1, 1] is 81·6/49 per series
        assert_eq!(model.accuracy, 0.9);
        assert!(model.is_surfaced());
        assert!(model.factors.contains(&"Best day: Sunday".to_string()));
    }
}
