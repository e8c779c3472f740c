//! Forecast error types

use thiserror::Error;

use crate::model::ModelKind;

/// Errors raised by forecasting strategies.
///
/// Inside the cascade these only cause a fall-through to the next stage.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Insufficient data points for the strategy
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Degenerate or non-finite numerics during fitting
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// Strategy is not enabled in this configuration
    #[error("Model unavailable: {0}")]
    Unavailable(ModelKind),
}

/// Result type for forecasting operations
pub type Result<T> = std::result::Result<T, ForecastError>;
