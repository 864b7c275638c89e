//! Analyzer framework
//!
//! Analyzers are pure functions over one borrowed snapshot of the entry
//! collection. They produce [`Insight`]s, which are never stored.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     ANALYTICS ENGINE                            │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐             │
//! │  │ Analyzer A  │  │ Analyzer B  │  │ Analyzer C  │  ...        │
//! │  │ (momentum)  │  │ (confidence)│  │ (forecast)  │             │
//! │  └──────┬──────┘  └──────┬──────┘  └──────┬──────┘             │
//! │         │                │                │                     │
//! │         ▼                ▼                ▼                     │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │             AnalyticsEngine.run_analyzer()              │   │
//! │  │  - Checks the analyzer's minimum entry count            │   │
//! │  │  - Calls analyzer.analyze() on the borrowed entries     │   │
//! │  │  - Returns an AnalyzerRunResult with the insights       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use aura_core::analytics::{create_default_engine, AnalyticsContext};
//!
//! let engine = create_default_engine();
//! let mut rng = rand::thread_rng();
//! let mut ctx = AnalyticsContext::new(today, &config.analytics, &mut rng);
//!
//! for result in engine.run_all(&entries, &mut ctx) {
//!     println!("{}: {:?}", result.analyzer_name, result.status);
//! }
//! ```

use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};
use rand::RngCore;

use super::insight::Insight;
use crate::config::AnalyticsConfig;
use crate::error::{Error, Result};
use crate::types::Entry;

/// Inputs shared by every analyzer in one run.
pub struct AnalyticsContext<'a> {
    /// Forecasts start the day after this date
    pub as_of: NaiveDate,
    pub config: &'a AnalyticsConfig,
    /// Randomness source for models that inject noise
    pub rng: &'a mut dyn RngCore,
}

impl<'a> AnalyticsContext<'a> {
    pub fn new(as_of: NaiveDate, config: &'a AnalyticsConfig, rng: &'a mut dyn RngCore) -> Self {
        Self { as_of, config, rng }
    }
}

/// Result of running one analyzer.
#[derive(Debug, Clone)]
pub struct AnalyzerRunResult {
    /// Name of the analyzer that was run
    pub analyzer_name: String,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// How long the analyzer took (milliseconds)
    pub duration_ms: i64,
    pub status: AnalyzerRunStatus,
    /// Number of entries handed to the analyzer
    pub input_entry_count: usize,
    /// What the analyzer produced; empty when data was insufficient
    pub insights: Vec<Insight>,
}

impl AnalyzerRunResult {
    pub fn insights_produced(&self) -> usize {
        self.insights.len()
    }
}

/// Status of an analyzer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerRunStatus {
    /// Analyzer ran over the entries
    Success,
    /// Fewer entries than the analyzer's minimum; nothing was computed
    InsufficientData,
}

impl AnalyzerRunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyzerRunStatus::Success => "success",
            AnalyzerRunStatus::InsufficientData => "insufficient_data",
        }
    }
}

/// Trait that every analyzer implements.
///
/// Analyzers are stateless and deterministic given the same entries and
/// context (randomness comes only from `ctx.rng`). Below their minimum they
/// return an empty collection rather than failing.
pub trait Analyzer: Send + Sync {
    /// Unique name. Convention: `core.<component>`.
    fn name(&self) -> &str;

    /// Entries required before the analyzer computes anything.
    fn min_entries(&self) -> usize;

    /// Analyze the entries, newest first.
    fn analyze(&self, entries: &[Entry], ctx: &mut AnalyticsContext) -> Vec<Insight>;
}

/// Registry that runs analyzers over an entry snapshot.
pub struct AnalyticsEngine {
    analyzers: Vec<Box<dyn Analyzer>>,
}

impl AnalyticsEngine {
    /// Create a new empty engine.
    pub fn new() -> Self {
        Self {
            analyzers: Vec::new(),
        }
    }

    /// Register an analyzer with the engine.
    pub fn register(&mut self, analyzer: Box<dyn Analyzer>) {
        tracing::debug!(analyzer = analyzer.name(), "Registered analyzer");
        self.analyzers.push(analyzer);
    }

    /// Registered analyzer names, in registration order.
    pub fn analyzer_names(&self) -> Vec<&str> {
        self.analyzers.iter().map(|a| a.name()).collect()
    }

    /// Check if an analyzer is registered.
    pub fn has_analyzer(&self, name: &str) -> bool {
        self.analyzers.iter().any(|a| a.name() == name)
    }

    /// Run one analyzer by name.
    ///
    /// Fails only when no analyzer has that name.
    pub fn run_analyzer(
        &self,
        name: &str,
        entries: &[Entry],
        ctx: &mut AnalyticsContext,
    ) -> Result<AnalyzerRunResult> {
        let analyzer = self
            .analyzers
            .iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| Error::Config(format!("Analyzer not found: {}", name)))?;

        Ok(Self::run(analyzer.as_ref(), entries, ctx))
    }

    /// Run every registered analyzer over the same entries.
    pub fn run_all(&self, entries: &[Entry], ctx: &mut AnalyticsContext) -> Vec<AnalyzerRunResult> {
        self.analyzers
            .iter()
            .map(|a| Self::run(a.as_ref(), entries, ctx))
            .collect()
    }

    fn run(analyzer: &dyn Analyzer, entries: &[Entry], ctx: &mut AnalyticsContext) -> AnalyzerRunResult {
        let started_at = Utc::now();
        let start = Instant::now();

        let (status, insights) = if entries.len() < analyzer.min_entries() {
            tracing::debug!(
                analyzer = analyzer.name(),
                entry_count = entries.len(),
                min_entries = analyzer.min_entries(),
                "Skipping analyzer, not enough entries"
            );
            (AnalyzerRunStatus::InsufficientData, Vec::new())
        } else {
            let insights = analyzer.analyze(entries, ctx);
            (AnalyzerRunStatus::Success, insights)
        };

        let duration_ms = start.elapsed().as_millis() as i64;
        tracing::debug!(
            analyzer = analyzer.name(),
            entry_count = entries.len(),
            insights = insights.len(),
            duration_ms,
            status = status.as_str(),
            "Analyzer finished"
        );

        AnalyzerRunResult {
            analyzer_name: analyzer.name().to_string(),
            started_at,
            duration_ms,
            status,
            input_entry_count: entries.len(),
            insights,
        }
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}
