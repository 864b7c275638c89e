//! Analytics plugins
//!
//! Each analyzer lives in its own subdirectory to support
//! multiple files if needed.
//!
//! ## Built-in Analyzers
//!
//! | Analyzer | Name | Min entries |
//! |----------|------|-------------|
//! | [`summary`] | `core.summary` | 1 |
//! | [`interventions`] | `core.interventions` | 1 |
//! | [`momentum`] | `core.momentum` | 3 |
//! | [`correlation`] | `core.correlation` | 3 |
//! | [`pattern_strength`] | `core.pattern_strength` | 5 |
//! | [`confidence`] | `core.confidence` | 7 |
//! | [`forecast`] | `core.forecast` | 7 |
//! | [`outlook`] | `core.outlook` | 7 |
//!
//! ## Creating Custom Analyzers
//!
//! 1. Create a new module implementing [`Analyzer`](super::Analyzer)
//! 2. Register it with the engine via [`AnalyticsEngine::register`](super::AnalyticsEngine::register)
//!
//! Or use [`create_default_engine`] to get an engine with all built-in analyzers.

pub mod confidence;
pub mod correlation;
pub mod forecast;
pub mod interventions;
pub mod momentum;
pub mod outlook;
pub mod pattern_strength;
pub mod summary;

use super::AnalyticsEngine;

/// Create an engine with all built-in analyzers registered.
///
/// ```rust,ignore
/// use aura_core::analytics::create_default_engine;
///
/// let engine = create_default_engine();
/// println!("Registered analyzers: {:?}", engine.analyzer_names());
/// ```
pub fn create_default_engine() -> AnalyticsEngine {
    let mut engine = AnalyticsEngine::new();
    engine.register(Box::new(summary::SummaryAnalyzer::new()));
    engine.register(Box::new(momentum::MomentumAnalyzer::new()));
    engine.register(Box::new(pattern_strength::PatternStrengthAnalyzer::new()));
    engine.register(Box::new(confidence::ConfidenceAnalyzer::new()));
    engine.register(Box::new(forecast::ForecastAnalyzer::new()));
    engine.register(Box::new(outlook::OutlookAnalyzer::new()));
    engine.register(Box::new(correlation::CorrelationAnalyzer::new()));
    engine.register(Box::new(interventions::InterventionsAnalyzer::new()));
    engine
}
