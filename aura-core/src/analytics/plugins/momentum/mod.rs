//! Momentum Indicator
//!
//! Compares the newest entry with the third-newest by position:
//! `((mood₀ - mood₂) + (energy₀ - energy₂)) / 2`.
//!
//! | Value | Direction | Strength |
//! |-------|-----------|----------|
//! | `> 0` | ascending | `|v| > 2` strong |
//! | `< 0` | descending | `|v| > 1` moderate |
//! | `0` | stable | otherwise weak |

use serde::Serialize;

use crate::analytics::engine::{AnalyticsContext, Analyzer};
use crate::analytics::insight::Insight;
use crate::types::Entry;

/// Entries needed for a momentum reading.
pub const MIN_ENTRIES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumDirection {
    Ascending,
    Descending,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumStrength {
    Strong,
    Moderate,
    Weak,
}

/// Short-range direction of mood and energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Momentum {
    pub value: f64,
    pub direction: MomentumDirection,
    pub strength: MomentumStrength,
}

impl Momentum {
    pub fn description(&self) -> String {
        let strength = match self.strength {
            MomentumStrength::Strong => "Strong",
            MomentumStrength::Moderate => "Moderate",
            MomentumStrength::Weak => "Weak",
        };
        let direction = match self.direction {
            MomentumDirection::Ascending => "upward",
            MomentumDirection::Descending => "downward",
            MomentumDirection::Stable => "steady",
        };
        format!("{} {} momentum ({:+.1})", strength, direction, self.value)
    }
}

/// Momentum over the three newest entries by position. `None` below three.
pub fn momentum(entries: &[Entry]) -> Option<Momentum> {
    if entries.len() < MIN_ENTRIES {
        return None;
    }
    let newest = &entries[0];
    let third = &entries[2];
    let mood_delta = newest.mood_f64() - third.mood_f64();
    let energy_delta = newest.energy_f64() - third.energy_f64();
    let value = (mood_delta + energy_delta) / 2.0;

    let direction = if value > 0.0 {
        MomentumDirection::Ascending
    } else if value < 0.0 {
        MomentumDirection::Descending
    } else {
        MomentumDirection::Stable
    };
    let strength = if value.abs() > 2.0 {
        MomentumStrength::Strong
    } else if value.abs() > 1.0 {
        MomentumStrength::Moderate
    } else {
        MomentumStrength::Weak
    };

    Some(Momentum {
        value,
        direction,
        strength,
    })
}

/// Analyzer wrapper for [`momentum`].
pub struct MomentumAnalyzer;

impl MomentumAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MomentumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for MomentumAnalyzer {
    fn name(&self) -> &str {
        "core.momentum"
    }

    fn min_entries(&self) -> usize {
        MIN_ENTRIES
    }

    fn analyze(&self, entries: &[Entry], _ctx: &mut AnalyticsContext) -> Vec<Insight> {
        momentum(entries).map(Insight::Momentum).into_iter().collect()
    }
}
