//! Budget projector trait.

use series_spi::MetricSeries;

use crate::error::Result;
use crate::model::{BudgetForecastOutcome, BudgetRange};

/// Projects revenue for candidate daily budgets from spend/revenue history.
pub trait BudgetProjector: Send + Sync {
    fn forecast_budget(
        &self,
        spend: &MetricSeries,
        revenue: &MetricSeries,
        target_roas: f64,
        range: &BudgetRange,
    ) -> Result<BudgetForecastOutcome>;
}
