//! Volatility-adjusted model: a short recent baseline plus random noise
//! scaled by historical volatility, widening with distance.

use chrono::NaiveDate;
use rand::Rng;

use super::{horizon, DayPrediction, ForecastKind, ForecastModel};
use crate::analytics::temporal::{mean_energy, mean_mood, Volatility};
use crate::types::Entry;

const BASELINE_WINDOW: usize = 3;

/// `None` with fewer than two entries (no transitions to measure).
pub fn volatility_model<R: Rng + ?Sized>(
    entries: &[Entry],
    as_of: NaiveDate,
    days: u32,
    rng: &mut R,
) -> Option<ForecastModel> {
    let volatility = Volatility::from_entries(entries)?;
    let recent = &entries[..entries.len().min(BASELINE_WINDOW)];
    let recent_mood = mean_mood(recent)?;
    let recent_energy = mean_energy(recent)?;

    let factor = (volatility.mean / 3.0).min(1.0);
    let horizon_len = days.max(1) as f64;

    let predictions = horizon(as_of, days)
        .map(|(i, date)| {
            let uncertainty = volatility.std_dev * factor * (i as f64 / horizon_len);
            let mood = recent_mood + (rng.gen::<f64>() - 0.5) * uncertainty;
            let energy = recent_energy + (rng.gen::<f64>() - 0.5) * uncertainty;
            let confidence = (0.8 - factor * 0.4 - i as f64 * 0.02).max(0.3);

            DayPrediction::new(
                date,
                mood,
                energy,
                confidence,
                format!("Volatility-adjusted (±{:.1} variance expected)", uncertainty),
            )
            .with_risk(volatility.mean > 2.0, "High volatility period - expect fluctuations")
            .with_opportunity(volatility.mean < 1.0, "Stable period - good for planning")
        })
        .collect();

    let accuracy = (0.7 - volatility.mean / 5.0).max(0.2);

    Some(ForecastModel::new(
        "Volatility-Adjusted Forecast",
        ForecastKind::VolatilityAdjusted,
        accuracy,
        "Accounts for your emotional volatility patterns and uncertainty ranges".to_string(),
        predictions,
        vec![
            format!("Average volatility: {:.2}", volatility.mean),
            format!("Volatility std dev: {:.2}", volatility.std_dev),
            format!("Recent mood baseline: {:.1}", recent_mood),
            format!("Uncertainty factor: {:.2}", volatility.mean / 3.0),
        ],
    ))
}
