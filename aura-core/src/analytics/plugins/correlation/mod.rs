//! Correlation Matrix
//!
//! Symmetric Pearson matrix over mood, energy and the most frequent tags.
//! A tag variable is 1 on entries carrying the tag and 0 elsewhere.

use serde::Serialize;

use crate::analytics::engine::{AnalyticsContext, Analyzer};
use crate::analytics::insight::Insight;
use crate::analytics::stats;
use crate::analytics::tags::top_tags;
use crate::types::Entry;

/// Entries needed before correlations are computed.
pub const MIN_ENTRIES: usize = 3;

/// Qualitative size of a coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
    Negligible,
}

impl CorrelationStrength {
    pub fn from_coefficient(r: f64) -> Self {
        let abs = r.abs();
        if abs > 0.7 {
            CorrelationStrength::Strong
        } else if abs > 0.4 {
            CorrelationStrength::Moderate
        } else if abs > 0.2 {
            CorrelationStrength::Weak
        } else {
            CorrelationStrength::Negligible
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationStrength::Strong => "strong",
            CorrelationStrength::Moderate => "moderate",
            CorrelationStrength::Weak => "weak",
            CorrelationStrength::Negligible => "negligible",
        }
    }
}

/// One off-diagonal pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationCell {
    pub first: String,
    pub second: String,
    pub coefficient: f64,
    pub strength: CorrelationStrength,
}

/// Square, symmetric, unit diagonal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub variables: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Coefficient between two named variables.
    pub fn get(&self, first: &str, second: &str) -> Option<f64> {
        let i = self.variables.iter().position(|v| v == first)?;
        let j = self.variables.iter().position(|v| v == second)?;
        Some(self.values[i][j])
    }

    /// Upper-triangle cells, row by row.
    pub fn cells(&self) -> Vec<CorrelationCell> {
        let n = self.variables.len();
        let mut cells = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                let coefficient = self.values[i][j];
                cells.push(CorrelationCell {
                    first: self.variables[i].clone(),
                    second: self.variables[j].clone(),
                    coefficient,
                    strength: CorrelationStrength::from_coefficient(coefficient),
                });
            }
        }
        cells
    }
}

/// Build the matrix over mood, energy and the `top_k` most frequent tags.
///
/// `None` below [`MIN_ENTRIES`].
pub fn correlation_matrix(entries: &[Entry], top_k: usize) -> Option<CorrelationMatrix> {
    if entries.len() < MIN_ENTRIES {
        return None;
    }

    let mut variables = vec!["mood".to_string(), "energy".to_string()];
    let mut series: Vec<Vec<f64>> = vec![
        entries.iter().map(Entry::mood_f64).collect(),
        entries.iter().map(Entry::energy_f64).collect(),
    ];
    for tag in top_tags(entries, top_k) {
        series.push(
            entries
                .iter()
                .map(|e| if e.has_tag(&tag) { 1.0 } else { 0.0 })
                .collect(),
        );
        variables.push(tag);
    }

    let n = variables.len();
    let mut values = vec![vec![0.0; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let r = stats::pearson(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Some(CorrelationMatrix { variables, values })
}

/// Analyzer wrapper for [`correlation_matrix`].
pub struct CorrelationAnalyzer;

impl CorrelationAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CorrelationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for CorrelationAnalyzer {
    fn name(&self) -> &str {
        "core.correlation"
    }

    fn min_entries(&self) -> usize {
        MIN_ENTRIES
    }

    fn analyze(&self, entries: &[Entry], ctx: &mut AnalyticsContext) -> Vec<Insight> {
        correlation_matrix(entries, ctx.config.top_tags)
            .map(|m| m.cells())
            .unwrap_or_default()
            .into_iter()
            .map(Insight::Correlation)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testutil::daily_entries;

    #[test]
    fn test_threshold_boundary() {
        let specs = [(7, 6, "walk"), (4, 4, ""), (8, 7, "walk")];
        assert!(correlation_matrix(&daily_entries(&specs[..2]), 5).is_none());
        assert!(correlation_matrix(&daily_entries(&specs), 5).is_some());
    }

    #[test]
    fn test_symmetric_with_unit_diagonal() {
        let entries = daily_entries(&[
            (8, 7, "walk, friends"),
            (3, 4, "work"),
            (7, 8, "walk"),
            (4, 3, "work, friends"),
            (6, 6, ""),
        ]);
        let m = correlation_matrix(&entries, 5).unwrap();
        assert_eq!(m.variables, vec!["mood", "energy", "walk", "friends", "work"]);

        let n = m.variables.len();
        for i in 0..n {
            assert_eq!(m.values[i][i], 1.0);
            for j in 0..n {
                assert_eq!(m.values[i][j], m.values[j][i]);
                assert!((-1.0..=1.0).contains(&m.values[i][j]));
            }
        }
        assert!(m.get("mood", "walk").unwrap() > 0.7);
        assert!(m.get("mood", "work").unwrap() < -0.7);
        assert_eq!(m.cells().len(), n * (n - 1) / 2);
    }

    #[test]
    fn test_constant_series_correlates_to_zero() {
        let entries = daily_entries(&[(5, 9, "a"), (5, 2, "a"), (5, 6, "a")]);
        let m = correlation_matrix(&entries, 5).unwrap();
        assert_eq!(m.get("mood", "energy"), Some(0.0));
        assert_eq!(m.get("energy", "a"), Some(0.0));
    }

    #[test]
    fn test_top_k_by_frequency() {
        let entries = daily_entries(&[
            (5, 5, "rare, common"),
            (6, 6, "common, mid"),
            (7, 7, "common, mid"),
        ]);
        let m = correlation_matrix(&entries, 2).unwrap();
        assert_eq!(m.variables, vec!["mood", "energy", "common", "mid"]);
    }

    #[test]
    fn test_strength_labels() {
        assert_eq!(CorrelationStrength::from_coefficient(-0.75), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::from_coefficient(0.7), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::from_coefficient(0.3), CorrelationStrength::Weak);
        assert_eq!(CorrelationStrength::from_coefficient(0.2), CorrelationStrength::Negligible);
    }
}
