//! Request shapes and their execution against the core.
//!
//! Each request validates its raw points exactly once, then calls a pure
//! core operation. The CLI reuses these types for its JSON input files.

use std::collections::BTreeMap;

use anomaly_facade::{
    validate_sensitivity, AnomalyEngine, AnomalyError, AnomalyResult, CorrelationAnalyzer,
    DetectionMethod, MultiMetricResult,
};
use budget_facade::{
    BudgetAllocator, BudgetError, BudgetForecastOutcome, BudgetOptimization, BudgetOptimizer,
    BudgetProjector, BudgetRange, BudgetReturnsModel, CampaignPerformance, OptimizationGoal,
};
use forecast_facade::{validate_horizon, ForecastCascade, ForecastError, ForecastResult};
use serde::{Deserialize, Serialize};
use series_facade::{validate, MetricSeries, RawDataPoint, SeriesError};
use thiserror::Error;

/// Input rejected before or during a core call.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Anomaly(#[from] AnomalyError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Budget(#[from] BudgetError),

    #[error("Malformed request: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The engines behind every operation. Stateless; safe to share.
#[derive(Debug, Default)]
pub struct Analytics {
    pub anomaly: AnomalyEngine,
    pub correlation: CorrelationAnalyzer,
    pub forecast: ForecastCascade,
    pub allocator: BudgetAllocator,
    pub returns: BudgetReturnsModel,
}

impl Analytics {
    pub fn new() -> Self {
        Self::default()
    }
}

fn default_sensitivity() -> f64 {
    2.0
}

fn default_method() -> String {
    "ensemble".to_string()
}

fn default_forecast_days() -> usize {
    7
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectRequest {
    pub campaign_id: i64,
    pub metric: String,
    pub data_points: Vec<RawDataPoint>,
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f64,
    /// One of `zscore`, `rolling`, `isolation_forest`, `ensemble`.
    #[serde(default = "default_method")]
    pub method: String,
}

impl DetectRequest {
    pub fn run(&self, analytics: &Analytics) -> Result<AnomalyResult, RequestError> {
        validate_sensitivity(self.sensitivity)?;
        let method: DetectionMethod = self.method.parse()?;
        let series = validate(&self.data_points)?;
        Ok(analytics.anomaly.detect_with(
            self.campaign_id,
            &self.metric,
            &series,
            self.sensitivity,
            method,
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiDetectRequest {
    pub campaign_id: i64,
    pub metrics_data: BTreeMap<String, Vec<RawDataPoint>>,
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f64,
}

impl MultiDetectRequest {
    pub fn run(&self, analytics: &Analytics) -> Result<MultiMetricResult, RequestError> {
        validate_sensitivity(self.sensitivity)?;
        let metrics = self
            .metrics_data
            .iter()
            .map(|(name, points)| Ok((name.clone(), validate(points)?)))
            .collect::<Result<BTreeMap<String, MetricSeries>, SeriesError>>()?;
        Ok(analytics
            .correlation
            .detect_multi(self.campaign_id, &metrics, self.sensitivity))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub campaign_id: i64,
    pub metric: String,
    pub historical_data: Vec<RawDataPoint>,
    #[serde(default = "default_forecast_days")]
    pub forecast_days: usize,
}

impl ForecastRequest {
    pub fn run(&self, analytics: &Analytics) -> Result<ForecastResult, RequestError> {
        validate_horizon(self.forecast_days)?;
        let series = validate(&self.historical_data)?;
        Ok(analytics.forecast.predict_with_horizon(
            self.campaign_id,
            &self.metric,
            &series,
            self.forecast_days,
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetForecastRequest {
    pub spend_data: Vec<RawDataPoint>,
    pub revenue_data: Vec<RawDataPoint>,
    pub target_roas: f64,
    #[serde(default)]
    pub budget_range: BudgetRange,
}

impl BudgetForecastRequest {
    pub fn run(&self, analytics: &Analytics) -> Result<BudgetForecastOutcome, RequestError> {
        let spend = validate(&self.spend_data)?;
        let revenue = validate(&self.revenue_data)?;
        Ok(analytics
            .returns
            .forecast_budget(&spend, &revenue, self.target_roas, &self.budget_range)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub organization_id: i64,
    pub total_budget: f64,
    pub campaigns: Vec<CampaignPerformance>,
    #[serde(default)]
    pub optimization_goal: OptimizationGoal,
}

impl OptimizeRequest {
    pub fn run(&self, analytics: &Analytics) -> Result<BudgetOptimization, RequestError> {
        Ok(analytics.allocator.optimize(
            self.organization_id,
            self.total_budget,
            &self.campaigns,
            &self.optimization_goal,
        )?)
    }
}

/// One entry of a batch response: the result, or why this item failed.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchEntry<T> {
    Success(T),
    Failure { index: usize, error: String },
}

impl<T> BatchEntry<T> {
    /// Deserialize and run one batch item; failures stay local to the item.
    pub fn evaluate<R>(
        index: usize,
        item: serde_json::Value,
        run: impl FnOnce(R) -> Result<T, RequestError>,
    ) -> Self
    where
        R: serde::de::DeserializeOwned,
    {
        let outcome = serde_json::from_value::<R>(item)
            .map_err(RequestError::from)
            .and_then(run);
        match outcome {
            Ok(result) => BatchEntry::Success(result),
            Err(e) => {
                tracing::warn!(index, error = %e, "batch item failed");
                BatchEntry::Failure {
                    index,
                    error: e.to_string(),
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BatchEntry::Success(_))
    }
}
