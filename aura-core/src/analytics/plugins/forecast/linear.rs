//! Linear trend model: least squares over chronological entry index.

use chrono::NaiveDate;

use super::{horizon, DayPrediction, ForecastKind, ForecastModel};
use crate::analytics::stats::{self, LinearFit};
use crate::types::Entry;

fn trend_word(slope: f64) -> &'static str {
    if slope > 0.0 {
        "improving"
    } else if slope < 0.0 {
        "declining"
    } else {
        "flat"
    }
}

/// Fit mood and energy against index and extrapolate past the newest entry.
///
/// Confidence starts at 76% for the first day and decays by 4 points per
/// day, bottoming out at 20%.
pub fn linear_trend_model(entries: &[Entry], as_of: NaiveDate, days: u32) -> Option<ForecastModel> {
    // entries are newest first; the fit wants oldest first
    let moods: Vec<f64> = entries.iter().rev().map(Entry::mood_f64).collect();
    let energies: Vec<f64> = entries.iter().rev().map(Entry::energy_f64).collect();
    let xs: Vec<f64> = (0..entries.len()).map(|i| i as f64).collect();

    let mood_fit = stats::linear_regression(&xs, &moods)?;
    let energy_fit = stats::linear_regression(&xs, &energies)?;
    let accuracy = ((stats::r_squared(&xs, &moods, &mood_fit)
        + stats::r_squared(&xs, &energies, &energy_fit))
        / 2.0)
        .max(0.0);

    let last_x = (entries.len() - 1) as f64;
    let predictions = horizon(as_of, days)
        .map(|(i, date)| predict_day(&mood_fit, &energy_fit, last_x + i as f64, i, date))
        .collect();

    Some(ForecastModel::new(
        "Linear Trend Forecast",
        ForecastKind::Linear,
        accuracy,
        format!(
            "Projects future mood and energy based on {} linear trends",
            trend_word(mood_fit.slope)
        ),
        predictions,
        vec![
            format!("Mood trend: {:+.3} per day", mood_fit.slope),
            format!("Energy trend: {:+.3} per day", energy_fit.slope),
            format!("R² accuracy: {:.1}%", accuracy * 100.0),
        ],
    ))
}

fn predict_day(mood_fit: &LinearFit, energy_fit: &LinearFit, x: f64, i: u32, date: NaiveDate) -> DayPrediction {
    let mood = mood_fit.predict(x);
    let confidence = (0.8 - 0.04 * i as f64).max(0.2);
    let reasoning = format!(
        "Linear trend: mood {} by {:.2}/day",
        trend_word(mood_fit.slope),
        mood_fit.slope.abs()
    );

    DayPrediction::new(date, mood, energy_fit.predict(x), confidence, reasoning)
        .with_risk(mood < 5.0, "Predicted low mood period")
        .with_opportunity(mood > 7.0, "High mood window - good for challenges")
}
