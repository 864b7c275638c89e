//! Advanced Forecasting
//!
//! Four independent models, each predicting mood and energy for the days
//! after `as_of` and scoring its own accuracy:
//!
//! | Model | Kind | Accuracy | Surfaced when |
//! |-------|------|----------|---------------|
//! | [`linear`] | linear | mean R² of mood and energy fits | `> 0.3` |
//! | [`seasonal`] | seasonal | `min(0.9, (var_mood + var_energy) / 8)` over weekday means | `> 0.4` |
//! | [`tag_impact`] | pattern-based | `min(0.8, significant_tags / 15 · 0.8)` | `> 0.35` |
//! | [`volatility`] | volatility-adjusted | `max(0.2, 0.7 - avg_change / 5)` | `> 0.4` |
//!
//! Predicted mood and energy are clamped to `[1, 10]` and rounded to one
//! decimal. Per-day confidence is a whole percent.

pub mod linear;
pub mod seasonal;
pub mod tag_impact;
pub mod volatility;

use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;
use serde::Serialize;

use crate::analytics::engine::{AnalyticsContext, Analyzer};
use crate::analytics::insight::Insight;
use crate::analytics::stats::{percent, round1};
use crate::types::{clamp_score, day_name, weekday_index, Entry};

/// Entries needed before any model is fitted.
pub const MIN_ENTRIES: usize = 7;

/// Which family a model belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastKind {
    Linear,
    Seasonal,
    PatternBased,
    VolatilityAdjusted,
}

impl ForecastKind {
    /// Accuracy a model must exceed to be surfaced.
    pub fn accuracy_floor(&self) -> f64 {
        match self {
            ForecastKind::Linear => 0.3,
            ForecastKind::Seasonal => 0.4,
            ForecastKind::PatternBased => 0.35,
            ForecastKind::VolatilityAdjusted => 0.4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastKind::Linear => "linear",
            ForecastKind::Seasonal => "seasonal",
            ForecastKind::PatternBased => "pattern-based",
            ForecastKind::VolatilityAdjusted => "volatility-adjusted",
        }
    }
}

/// One predicted day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPrediction {
    pub date: NaiveDate,
    pub day_name: String,
    /// 1-10, one decimal
    pub mood: f64,
    /// 1-10, one decimal
    pub energy: f64,
    /// Whole percent
    pub confidence: u8,
    pub reasoning: String,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
}

impl DayPrediction {
    /// Build a prediction, clamping and rounding mood/energy.
    pub(crate) fn new(
        date: NaiveDate,
        mood: f64,
        energy: f64,
        confidence: f64,
        reasoning: String,
    ) -> Self {
        Self {
            date,
            day_name: day_name(weekday_index(date.weekday())).to_string(),
            mood: round1(clamp_score(mood)),
            energy: round1(clamp_score(energy)),
            confidence: percent(confidence),
            reasoning,
            risks: Vec::new(),
            opportunities: Vec::new(),
        }
    }

    pub(crate) fn with_risk(mut self, when: bool, risk: impl Into<String>) -> Self {
        if when {
            self.risks.push(risk.into());
        }
        self
    }

    pub(crate) fn with_opportunity(mut self, when: bool, opportunity: impl Into<String>) -> Self {
        if when {
            self.opportunities.push(opportunity.into());
        }
        self
    }
}

/// A fitted model and its predictions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastModel {
    pub name: String,
    pub kind: ForecastKind,
    /// Self-reported accuracy, 0-1
    pub accuracy: f64,
    /// Accuracy as a whole percent
    pub confidence: u8,
    pub description: String,
    pub predictions: Vec<DayPrediction>,
    pub factors: Vec<String>,
}

impl ForecastModel {
    pub(crate) fn new(
        name: &str,
        kind: ForecastKind,
        accuracy: f64,
        description: String,
        predictions: Vec<DayPrediction>,
        factors: Vec<String>,
    ) -> Self {
        let accuracy = accuracy.clamp(0.0, 1.0);
        Self {
            name: name.to_string(),
            kind,
            accuracy,
            confidence: percent(accuracy),
            description,
            predictions,
            factors,
        }
    }

    /// Whether the model clears its kind's accuracy floor.
    pub fn is_surfaced(&self) -> bool {
        self.accuracy > self.kind.accuracy_floor()
    }
}

/// The `days` dates following `as_of`.
pub(crate) fn horizon(as_of: NaiveDate, days: u32) -> impl Iterator<Item = (u32, NaiveDate)> {
    (1..=days).map(move |i| (i, as_of + Duration::days(i as i64)))
}

/// Fit every model and keep the ones above their accuracy floor, most
/// accurate first. Empty below [`MIN_ENTRIES`].
pub fn forecast_models<R: Rng + ?Sized>(
    entries: &[Entry],
    as_of: NaiveDate,
    days: u32,
    rng: &mut R,
) -> Vec<ForecastModel> {
    if entries.len() < MIN_ENTRIES {
        return Vec::new();
    }

    let candidates = [
        linear::linear_trend_model(entries, as_of, days),
        seasonal::seasonal_model(entries, as_of, days),
        tag_impact::tag_impact_model(entries, as_of, days),
        volatility::volatility_model(entries, as_of, days, rng),
    ];

    let mut models: Vec<ForecastModel> = candidates
        .into_iter()
        .flatten()
        .filter(|m| {
            let keep = m.is_surfaced();
            if !keep {
                tracing::debug!(model = %m.name, accuracy = m.accuracy, "Dropping forecast model below accuracy floor");
            }
            keep
        })
        .collect();

    models.sort_by(|a, b| b.accuracy.total_cmp(&a.accuracy));
    models
}

/// Analyzer wrapper for [`forecast_models`].
pub struct ForecastAnalyzer;

impl ForecastAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ForecastAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for ForecastAnalyzer {
    fn name(&self) -> &str {
        "core.forecast"
    }

    fn min_entries(&self) -> usize {
        MIN_ENTRIES
    }

    fn analyze(&self, entries: &[Entry], ctx: &mut AnalyticsContext) -> Vec<Insight> {
        forecast_models(entries, ctx.as_of, ctx.config.forecast_days, &mut *ctx.rng)
            .into_iter()
            .map(Insight::Forecast)
            .collect()
    }
}
