//! Forecast Facade
//!
//! High-level API for metric forecasting. Re-exports all public types from
//! the forecast stack for convenient usage.

// Re-export everything from SPI
pub use forecast_spi::*;

// Re-export everything from API
pub use forecast_api::*;

// Explicit re-exports for documentation
pub use forecast_api::prelude;

// Re-export core modules for direct access
pub use forecast_core::{boosting, cascade, confidence, seasonal, statistical, trend};

pub use forecast_core::{
    ForecastCascade, GradientBoostingForecaster, SeasonalRegressionForecaster,
    StatisticalForecaster,
};
