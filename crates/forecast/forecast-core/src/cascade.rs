//! Model-selection cascade.

use forecast_api::ForecastConfig;
use forecast_spi::{
    ForecastError, ForecastResult, ForecastStrategy, ForecastSummary, ModelKind,
};
use series_core::{mean, round_to};
use series_spi::MetricSeries;

use crate::boosting::GradientBoostingForecaster;
use crate::confidence::{confidence_score, interval_half_width, to_forecast_points};
use crate::seasonal::SeasonalRegressionForecaster;
use crate::statistical::StatisticalForecaster;
use crate::trend::trend_direction;

/// Tries each optional strategy in order and falls back to the statistical
/// forecaster.
///
/// A strategy that is disabled, fails, or returns the wrong number of values
/// is skipped. Every call refits from scratch.
pub struct ForecastCascade {
    config: ForecastConfig,
    strategies: Vec<Box<dyn ForecastStrategy>>,
    fallback: StatisticalForecaster,
}

impl ForecastCascade {
    /// Seasonal regression, then gradient boosting, then statistical.
    pub fn new(config: ForecastConfig) -> Self {
        let strategies: Vec<Box<dyn ForecastStrategy>> = vec![
            Box::new(SeasonalRegressionForecaster::default()),
            Box::new(GradientBoostingForecaster::new(config.boosting.clone())),
        ];
        Self::with_strategies(config, strategies)
    }

    pub fn with_strategies(config: ForecastConfig, strategies: Vec<Box<dyn ForecastStrategy>>) -> Self {
        Self {
            config,
            strategies,
            fallback: StatisticalForecaster::default(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ForecastConfig::default())
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast with the configured horizon.
    pub fn predict(&self, campaign_id: i64, metric: &str, series: &MetricSeries) -> ForecastResult {
        self.predict_with_horizon(campaign_id, metric, series, self.config.horizon_days)
    }

    pub fn predict_with_horizon(
        &self,
        campaign_id: i64,
        metric: &str,
        series: &MetricSeries,
        horizon: usize,
    ) -> ForecastResult {
        let Some(last_date) = series.last_date() else {
            return ForecastResult::insufficient_data(campaign_id, metric);
        };
        if series.len() < self.config.min_points {
            return ForecastResult::insufficient_data(campaign_id, metric);
        }

        let values = series.values();
        let (model_used, raw) = self.run_cascade(series, &values, horizon);

        let predictions = to_forecast_points(last_date, &raw, interval_half_width(&values));
        let forecasted_avg = if predictions.is_empty() {
            None
        } else {
            let predicted: Vec<f64> = predictions.iter().map(|p| p.predicted_value).collect();
            Some(round_to(mean(&predicted), 4))
        };
        let recent = &values[values.len().saturating_sub(7)..];

        tracing::debug!(
            campaign_id,
            metric,
            model = %model_used,
            horizon,
            "forecast complete"
        );

        ForecastResult {
            campaign_id,
            metric: metric.to_string(),
            predictions,
            confidence: confidence_score(values.len()),
            model_used,
            summary: ForecastSummary {
                current_avg: Some(round_to(mean(recent), 4)),
                forecasted_avg,
                trend_direction: Some(trend_direction(&values)),
                data_points: values.len(),
                confidence: None,
            },
        }
    }

    fn run_cascade(
        &self,
        series: &MetricSeries,
        values: &[f64],
        horizon: usize,
    ) -> (ModelKind, Vec<f64>) {
        for strategy in &self.strategies {
            let kind = strategy.kind();
            let attempt = if self.config.is_enabled(kind) {
                strategy.forecast(series, horizon)
            } else {
                Err(ForecastError::Unavailable(kind))
            };

            match attempt {
                Ok(predictions) if predictions.len() == horizon => return (kind, predictions),
                Ok(predictions) => {
                    tracing::debug!(
                        model = %kind,
                        expected = horizon,
                        got = predictions.len(),
                        "strategy returned wrong horizon, falling through"
                    );
                }
                Err(e) => {
                    tracing::debug!(model = %kind, error = %e, "strategy unavailable, falling through");
                }
            }
        }

        (
            ModelKind::Statistical,
            self.fallback.predict_values(values, horizon),
        )
    }
}

impl Default for ForecastCascade {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for ForecastCascade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastCascade")
            .field("config", &self.config)
            .field(
                "strategies",
                &self.strategies.iter().map(|s| s.kind()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
