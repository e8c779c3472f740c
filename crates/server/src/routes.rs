//! HTTP routes and handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use rayon::prelude::*;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use anomaly_facade::{AnomalyResult, MultiMetricResult};
use budget_facade::{BudgetForecastOutcome, BudgetOptimization};
use forecast_facade::ForecastResult;

use crate::auth::require_api_key;
use crate::error::{ApiError, ApiResult};
use crate::health::{liveness, readiness};
use crate::requests::{
    Analytics, BatchEntry, BudgetForecastRequest, DetectRequest, ForecastRequest,
    MultiDetectRequest, OptimizeRequest, RequestError,
};
use crate::state::AppState;

type Payload<T> = Result<Json<T>, JsonRejection>;

#[derive(Debug, Serialize)]
pub struct DetectBatchResponse {
    pub results: Vec<BatchEntry<AnomalyResult>>,
}

#[derive(Debug, Serialize)]
pub struct PredictBatchResponse {
    pub predictions: Vec<BatchEntry<ForecastResult>>,
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route("/anomaly/detect", post(detect))
        .route("/anomaly/detect-multi", post(detect_multi))
        .route("/anomaly/batch-detect", post(batch_detect))
        .route("/forecast/predict", post(predict))
        .route("/forecast/batch-predict", post(batch_predict))
        .route("/forecast/budget", post(forecast_budget))
        .route("/budget/optimize", post(optimize))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(liveness))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run numeric work on the blocking pool.
async fn run_blocking<T, F>(state: &AppState, work: F) -> ApiResult<T>
where
    F: FnOnce(&Analytics) -> Result<T, RequestError> + Send + 'static,
    T: Send + 'static,
{
    let analytics = state.analytics.clone();
    tokio::task::spawn_blocking(move || work(&analytics))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

async fn detect(
    State(state): State<AppState>,
    payload: Payload<DetectRequest>,
) -> ApiResult<Json<AnomalyResult>> {
    let Json(request) = payload?;
    tracing::debug!(campaign_id = request.campaign_id, metric = %request.metric, "detect");
    run_blocking(&state, move |analytics| request.run(analytics))
        .await
        .map(Json)
}

async fn detect_multi(
    State(state): State<AppState>,
    payload: Payload<MultiDetectRequest>,
) -> ApiResult<Json<MultiMetricResult>> {
    let Json(request) = payload?;
    run_blocking(&state, move |analytics| request.run(analytics))
        .await
        .map(Json)
}

async fn batch_detect(
    State(state): State<AppState>,
    payload: Payload<Vec<serde_json::Value>>,
) -> ApiResult<Json<DetectBatchResponse>> {
    let Json(items) = payload?;
    tracing::info!(items = items.len(), "batch detect");
    let results = run_blocking(&state, move |analytics| {
        Ok(items
            .into_par_iter()
            .enumerate()
            .map(|(index, item)| {
                BatchEntry::evaluate(index, item, |r: DetectRequest| r.run(analytics))
            })
            .collect::<Vec<_>>())
    })
    .await?;
    Ok(Json(DetectBatchResponse { results }))
}

async fn predict(
    State(state): State<AppState>,
    payload: Payload<ForecastRequest>,
) -> ApiResult<Json<ForecastResult>> {
    let Json(request) = payload?;
    tracing::debug!(campaign_id = request.campaign_id, metric = %request.metric, "predict");
    run_blocking(&state, move |analytics| request.run(analytics))
        .await
        .map(Json)
}

async fn batch_predict(
    State(state): State<AppState>,
    payload: Payload<Vec<serde_json::Value>>,
) -> ApiResult<Json<PredictBatchResponse>> {
    let Json(items) = payload?;
    tracing::info!(items = items.len(), "batch predict");
    let predictions = run_blocking(&state, move |analytics| {
        Ok(items
            .into_par_iter()
            .enumerate()
            .map(|(index, item)| {
                BatchEntry::evaluate(index, item, |r: ForecastRequest| r.run(analytics))
            })
            .collect::<Vec<_>>())
    })
    .await?;
    Ok(Json(PredictBatchResponse { predictions }))
}

async fn forecast_budget(
    State(state): State<AppState>,
    payload: Payload<BudgetForecastRequest>,
) -> ApiResult<Json<BudgetForecastOutcome>> {
    let Json(request) = payload?;
    run_blocking(&state, move |analytics| request.run(analytics))
        .await
        .map(Json)
}

async fn optimize(
    State(state): State<AppState>,
    payload: Payload<OptimizeRequest>,
) -> ApiResult<Json<BudgetOptimization>> {
    let Json(request) = payload?;
    tracing::debug!(
        organization_id = request.organization_id,
        campaigns = request.campaigns.len(),
        "optimize"
    );
    run_blocking(&state, move |analytics| request.run(analytics))
        .await
        .map(Json)
}
