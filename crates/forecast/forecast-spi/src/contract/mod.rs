//! Contract definitions for forecasting.

mod forecast_strategy;

pub use forecast_strategy::ForecastStrategy;
