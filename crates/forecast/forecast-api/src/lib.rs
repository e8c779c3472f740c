//! Forecast Consumer API
//!
//! Configuration for the forecasting cascade:
//! - which optional model stages are enabled
//! - gradient boosting hyperparameters
//! - default horizon

// Re-export from SPI
pub use forecast_spi::{
    ForecastError, ForecastPoint, ForecastResult, ForecastStrategy, ForecastSummary, ModelKind,
    Result, TrendDirection,
};

use serde::{Deserialize, Serialize};

/// Longest horizon accepted by [`validate_horizon`].
pub const MAX_HORIZON_DAYS: usize = 365;

/// Hyperparameters for the gradient-boosted lag regressor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostingConfig {
    /// Boosting rounds
    pub n_estimators: usize,
    /// Depth of each regression tree
    pub max_depth: usize,
    /// Shrinkage applied to every tree's output
    pub learning_rate: f64,
    /// Upper bound on the lag window; the effective lag is min(max_lag, n - 1)
    pub max_lag: usize,
}

impl Default for BoostingConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 3,
            learning_rate: 0.1,
            max_lag: 7,
        }
    }
}

/// Cascade configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Default number of days to forecast
    pub horizon_days: usize,
    /// Series shorter than this get the insufficient-data result
    pub min_points: usize,
    /// Optional stages that may run, in no particular order. The
    /// statistical fallback is always available.
    pub strategies: Vec<ModelKind>,
    pub boosting: BoostingConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: 7,
            min_points: 3,
            strategies: vec![ModelKind::SeasonalRegression, ModelKind::GradientBoosting],
            boosting: BoostingConfig::default(),
        }
    }
}

impl ForecastConfig {
    pub fn new(horizon_days: usize) -> Self {
        Self {
            horizon_days,
            ..Self::default()
        }
    }

    /// Statistical fallback only.
    pub fn statistical_only() -> Self {
        Self {
            strategies: Vec::new(),
            ..Self::default()
        }
    }

    pub fn with_strategies(mut self, strategies: Vec<ModelKind>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn with_boosting(mut self, boosting: BoostingConfig) -> Self {
        self.boosting = boosting;
        self
    }

    /// Whether a stage may run under this configuration.
    pub fn is_enabled(&self, kind: ModelKind) -> bool {
        match kind {
            ModelKind::Statistical => true,
            ModelKind::None => false,
            other => self.strategies.contains(&other),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_horizon(self.horizon_days)?;
        if self.boosting.max_depth == 0 {
            return Err(ForecastError::InvalidParameter {
                name: "max_depth".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.boosting.learning_rate > 0.0 && self.boosting.learning_rate <= 1.0) {
            return Err(ForecastError::InvalidParameter {
                name: "learning_rate".to_string(),
                reason: format!("must be in (0, 1], got {}", self.boosting.learning_rate),
            });
        }
        Ok(())
    }
}

/// Horizon must be between 1 and [`MAX_HORIZON_DAYS`].
pub fn validate_horizon(horizon_days: usize) -> Result<()> {
    if (1..=MAX_HORIZON_DAYS).contains(&horizon_days) {
        Ok(())
    } else {
        Err(ForecastError::InvalidParameter {
            name: "forecast_days".to_string(),
            reason: format!(
                "must be between 1 and {}, got {}",
                MAX_HORIZON_DAYS, horizon_days
            ),
        })
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{BoostingConfig, ForecastConfig};
    pub use forecast_spi::{
        ForecastError, ForecastPoint, ForecastResult, ForecastStrategy, ForecastSummary,
        ModelKind, Result, TrendDirection,
    };
}
