//! Analytics module for aura
//!
//! Turns the entry collection into derived insights:
//! - Shared statistical primitives ([`stats`])
//! - Tag attribution ([`tags`])
//! - Day-of-week and recency analysis ([`temporal`])
//! - Analyzer plugins: momentum, pattern strength, confidence scoring,
//!   forecasting, weekly outlook, correlations, detailed statistics,
//!   interventions
//!
//! ## Analyzer Framework
//!
//! Every component implements [`Analyzer`] and is run by an
//! [`AnalyticsEngine`] over one borrowed snapshot of the entries. Analyzers
//! hold no state, never fail, and return an empty collection when given
//! fewer entries than they need.
//!
//! See [`engine`] for the framework and [`plugins`] for the built-in analyzers.

pub mod engine;
pub mod insight;
pub mod plugins;
pub mod stats;
pub mod tags;
pub mod temporal;

#[cfg(test)]
pub(crate) mod testutil;

pub use engine::{
    AnalyticsContext, AnalyticsEngine, Analyzer, AnalyzerRunResult, AnalyzerRunStatus,
};
pub use insight::Insight;
pub use plugins::create_default_engine;
pub use plugins::{
    confidence::{confidence_scores, ConfidenceScore, Reliability},
    correlation::{correlation_matrix, CorrelationCell, CorrelationMatrix, CorrelationStrength},
    forecast::{forecast_models, DayPrediction, ForecastKind, ForecastModel},
    interventions::{interventions, Intervention, InterventionConfidence, InterventionTiming},
    momentum::{momentum, Momentum, MomentumDirection, MomentumStrength},
    outlook::{weekly_outlook, OutlookDay},
    pattern_strength::{pattern_strengths, PatternInsight, PatternLevel},
    summary::{detailed_statistics, DetailedStatistics, SeriesStats, Streaks},
};
pub use tags::{tag_impacts, top_tags, ImpactDirection, TagImpact};
pub use temporal::{Volatility, WeekdayProfile};
