//! Derived insights
//!
//! Everything an analyzer produces is one of these variants. Insights are
//! recomputed from the entries on every call and never persisted.

use serde::Serialize;

use super::plugins::confidence::ConfidenceScore;
use super::plugins::correlation::CorrelationCell;
use super::plugins::forecast::ForecastModel;
use super::plugins::interventions::Intervention;
use super::plugins::momentum::Momentum;
use super::plugins::outlook::OutlookDay;
use super::plugins::pattern_strength::PatternInsight;
use super::plugins::summary::DetailedStatistics;

/// Output of an analyzer, tagged by `kind` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    Pattern(PatternInsight),
    Confidence(ConfidenceScore),
    Forecast(ForecastModel),
    Correlation(CorrelationCell),
    Momentum(Momentum),
    Outlook(OutlookDay),
    Statistics(DetailedStatistics),
    Intervention(Intervention),
}

impl Insight {
    pub fn kind(&self) -> &'static str {
        match self {
            Insight::Pattern(_) => "pattern",
            Insight::Confidence(_) => "confidence",
            Insight::Forecast(_) => "forecast",
            Insight::Correlation(_) => "correlation",
            Insight::Momentum(_) => "momentum",
            Insight::Outlook(_) => "outlook",
            Insight::Statistics(_) => "statistics",
            Insight::Intervention(_) => "intervention",
        }
    }

    /// One-line summary for listings.
    pub fn headline(&self) -> String {
        match self {
            Insight::Pattern(p) => format!("{} ({:.1}/10): {}", p.name, p.strength, p.description),
            Insight::Confidence(c) => format!(
                "{}: {}% confidence ({})",
                c.pattern,
                (c.confidence * 100.0).round(),
                c.reliability.as_str()
            ),
            Insight::Forecast(f) => format!("{}: {}% accuracy", f.name, f.confidence),
            Insight::Correlation(c) => format!(
                "{} ~ {}: {:+.2} ({})",
                c.first,
                c.second,
                c.coefficient,
                c.strength.as_str()
            ),
            Insight::Momentum(m) => m.description(),
            Insight::Outlook(o) => format!(
                "{} {}: mood {:.1}, energy {:.1} ({}% confidence)",
                o.day_name, o.date, o.mood, o.energy, o.confidence
            ),
            Insight::Statistics(s) => format!(
                "{} entries over {} days, mood {:.1} avg, energy {:.1} avg",
                s.entry_count, s.time_span_days, s.mood.mean, s.energy.mean
            ),
            Insight::Intervention(i) => {
                format!("{} ({} confidence)", i.text, i.confidence.as_str())
            }
        }
    }
}
