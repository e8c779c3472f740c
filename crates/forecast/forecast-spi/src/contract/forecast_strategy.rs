//! Forecast strategy trait definition.

use series_spi::MetricSeries;

use crate::error::Result;
use crate::model::ModelKind;

/// One stage of the forecasting cascade.
///
/// A strategy either produces exactly `horizon` raw predictions or returns
/// an error; the cascade then falls through to the next stage. Strategies
/// are stateless across calls and fit on every invocation.
pub trait ForecastStrategy: Send + Sync {
    /// Label reported as `model_used` when this strategy wins.
    fn kind(&self) -> ModelKind;

    /// Predict `horizon` daily values following the last point of `series`.
    fn forecast(&self, series: &MetricSeries, horizon: usize) -> Result<Vec<f64>>;
}
