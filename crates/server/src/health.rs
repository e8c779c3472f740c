//! Liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::json;

use anomaly_facade::DetectionMethod;
use forecast_facade::ModelKind;
use chrono::NaiveDate;
use series_facade::MetricSeries;

use crate::requests::Analytics;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub name: &'static str,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckReport {
    fn healthy(name: &'static str) -> Self {
        Self {
            name,
            healthy: true,
            message: None,
        }
    }

    fn unhealthy(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            healthy: false,
            message: Some(message.into()),
        }
    }
}

/// Liveness probe: the process is up.
pub async fn liveness() -> Json<serde_json::Value> {
    Json(json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness probe: the engines answer a small known input.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let analytics = state.analytics.clone();
    let checks = tokio::task::spawn_blocking(move || self_check(&analytics))
        .await
        .unwrap_or_else(|e| vec![CheckReport::unhealthy("engines", e.to_string())]);

    let ready = checks.iter().all(|check| check.healthy);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if ready { "ready" } else { "not_ready" },
            "version": env!("CARGO_PKG_VERSION"),
            "checks": checks,
        })),
    )
}

/// Run each engine once on a synthetic series.
pub fn self_check(analytics: &Analytics) -> Vec<CheckReport> {
    let Some(start) = NaiveDate::from_ymd_opt(2024, 1, 1) else {
        return vec![CheckReport::unhealthy("series", "invalid probe date")];
    };
    let values: Vec<f64> = (0..21).map(|i| 100.0 + (i % 7) as f64 * 5.0).collect();
    let series = MetricSeries::daily(start, &values);

    let anomaly = analytics
        .anomaly
        .detect_with(0, "probe", &series, 2.0, DetectionMethod::Ensemble);
    let anomaly_check = if anomaly.statistics.is_some() {
        CheckReport::healthy("anomaly")
    } else {
        CheckReport::unhealthy("anomaly", "no statistics for probe series")
    };

    let forecast = analytics.forecast.predict(0, "probe", &series);
    let forecast_check = if forecast.model_used != ModelKind::None && !forecast.is_empty() {
        CheckReport::healthy("forecast")
    } else {
        CheckReport::unhealthy("forecast", "no model produced a forecast")
    };

    vec![anomaly_check, forecast_check]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_check_passes_with_default_engines() {
        let checks = self_check(&Analytics::new());
        assert_eq!(checks.len(), 2);
        assert!(checks.iter().all(|c| c.healthy), "{checks:?}");
    }
}
