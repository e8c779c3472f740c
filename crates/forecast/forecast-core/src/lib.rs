//! Forecast Core
//!
//! Strategy implementations and the cascade that picks the first one that
//! succeeds, plus interval, confidence and trend helpers.

pub mod boosting;
pub mod cascade;
pub mod confidence;
pub mod seasonal;
pub mod statistical;
pub mod trend;

// Re-export SPI types for implementations
pub use forecast_spi::{
    ForecastError, ForecastPoint, ForecastResult, ForecastStrategy, ForecastSummary, ModelKind,
    Result, TrendDirection,
};

// Re-export main types
pub use boosting::{GradientBoostedTrees, GradientBoostingForecaster, RegressionTree};
pub use cascade::ForecastCascade;
pub use confidence::{confidence_score, interval_half_width, to_forecast_points};
pub use seasonal::SeasonalRegressionForecaster;
pub use statistical::StatisticalForecaster;
pub use trend::trend_direction;
