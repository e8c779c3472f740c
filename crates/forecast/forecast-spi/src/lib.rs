//! Forecast Service Provider Interface
//!
//! Defines the forecasting strategy contract and the prediction types
//! produced by the model cascade.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::ForecastStrategy;
pub use error::{ForecastError, Result};
pub use model::{ForecastPoint, ForecastResult, ForecastSummary, ModelKind, TrendDirection};
