//! Budget API
//!
//! Configuration for the allocator and the diminishing-returns projector.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use budget_spi::{
    BudgetError, BudgetForecast, BudgetForecastOutcome, BudgetOptimization, BudgetRange,
    BudgetRecommendation, BudgetScenario, CampaignPerformance, ExpectedImprovement,
    ForecastConfidence, InsufficientBudgetData, OptimizationGoal, Result,
};

// ============================================================================
// Allocator Configuration
// ============================================================================

/// Allocator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Changes smaller than this (in percent, absolute) are reported as
    /// "maintain" and left out of the summary counts.
    pub maintain_threshold_percent: f64,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            maintain_threshold_percent: 5.0,
        }
    }
}

// ============================================================================
// Returns Model Configuration
// ============================================================================

/// Diminishing-returns projector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnsConfig {
    /// Shortest spend history that gets a projection.
    pub min_points: usize,
    /// Trailing window for the average daily spend and revenue.
    pub trailing_window: usize,
    /// Spend multipliers of the trailing average to project.
    pub multipliers: Vec<f64>,
    /// History length at which confidence becomes medium.
    pub medium_confidence_points: usize,
    /// Default lower bound as a fraction of average spend.
    pub default_min_factor: f64,
    /// Default upper bound as a fraction of average spend.
    pub default_max_factor: f64,
}

impl Default for ReturnsConfig {
    fn default() -> Self {
        Self {
            min_points: 7,
            trailing_window: 7,
            multipliers: vec![0.5, 0.75, 1.0, 1.25, 1.5, 2.0],
            medium_confidence_points: 30,
            default_min_factor: 0.5,
            default_max_factor: 2.0,
        }
    }
}

impl ReturnsConfig {
    pub fn with_multipliers(mut self, multipliers: Vec<f64>) -> Self {
        self.multipliers = multipliers;
        self
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{AllocatorConfig, ReturnsConfig};
    pub use budget_spi::{
        BudgetForecastOutcome, BudgetOptimization, BudgetOptimizer, BudgetProjector,
        BudgetRange, CampaignPerformance, OptimizationGoal,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let returns = ReturnsConfig::default();
        assert_eq!(returns.min_points, 7);
        assert_eq!(returns.multipliers, vec![0.5, 0.75, 1.0, 1.25, 1.5, 2.0]);
        assert_eq!(AllocatorConfig::default().maintain_threshold_percent, 5.0);
    }

    #[test]
    fn test_with_multipliers() {
        let config = ReturnsConfig::default().with_multipliers(vec![1.0, 3.0]);
        assert_eq!(config.multipliers.len(), 2);
        assert_eq!(config.min_points, 7);
    }
}
