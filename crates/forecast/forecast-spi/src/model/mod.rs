//! Data models for forecasting.

mod forecast_point;
mod forecast_result;
mod model_kind;

pub use forecast_point::ForecastPoint;
pub use forecast_result::{ForecastResult, ForecastSummary};
pub use model_kind::{ModelKind, TrendDirection};
