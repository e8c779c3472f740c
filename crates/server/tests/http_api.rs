//! HTTP boundary tests driven through the router with `oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::{app, AppState};

const KEY: &str = "test-key";

fn test_router() -> Router {
    app(AppState::new(KEY))
}

fn series(values: &[f64]) -> Value {
    Value::Array(
        values
            .iter()
            .enumerate()
            .map(|(i, v)| json!({"date": format!("2024-06-{:02}", i + 1), "value": v}))
            .collect(),
    )
}

async fn post(uri: &str, key: Option<&str>, body: Value) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = key {
        builder = builder.header("X-API-Key", key);
    }
    let resp = test_router()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_needs_no_key() {
    for uri in ["/health", "/health/live"] {
        let resp = test_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn readiness_reports_checks() {
    let resp = test_router()
        .oneshot(
            Request::builder()
                .uri("/health/ready")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ready");
    assert_eq!(json["checks"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn api_rejects_missing_or_wrong_key() {
    let body = json!({"campaign_id": 1, "metric": "cpc", "data_points": []});

    let (status, json) = post("/api/v1/anomaly/detect", None, body.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"]["type"], "authorization_error");

    let (status, _) = post("/api/v1/anomaly/detect", Some("nope"), body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn detect_flags_spike() {
    let mut values = vec![10.0; 9];
    values.push(50.0);
    let body = json!({
        "campaign_id": 7,
        "metric": "spend",
        "data_points": series(&values),
        "method": "zscore"
    });

    let (status, json) = post("/api/v1/anomaly/detect", Some(KEY), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["campaign_id"], 7);
    assert_eq!(json["is_anomalous"], true);
    let dates: Vec<&str> = json["anomalies"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a["date"].as_str())
        .collect();
    assert!(dates.contains(&"2024-06-10"));
}

#[tokio::test]
async fn detect_short_series_is_not_an_error() {
    let body = json!({
        "campaign_id": 1,
        "metric": "ctr",
        "data_points": series(&[1.0, 2.0])
    });
    let (status, json) = post("/api/v1/anomaly/detect", Some(KEY), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["is_anomalous"], false);
    assert_eq!(json["anomaly_count"], 0);
}

#[tokio::test]
async fn detect_constant_series_at_zero_sensitivity() {
    let body = json!({
        "campaign_id": 4,
        "metric": "cpm",
        "data_points": series(&[12.0; 6]),
        "sensitivity": 0.0,
        "method": "ensemble"
    });
    let (status, json) = post("/api/v1/anomaly/detect", Some(KEY), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["is_anomalous"], false);
    assert_eq!(json["anomaly_count"], 0);
    assert_eq!(json["summary"], "No variance detected in cpm data.");
}

#[tokio::test]
async fn invalid_input_is_422() {
    let bad_date = json!({
        "campaign_id": 1,
        "metric": "ctr",
        "data_points": [{"date": "2024-02-30", "value": 1.0}]
    });
    let (status, json) = post("/api/v1/anomaly/detect", Some(KEY), bad_date).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["type"], "validation_error");

    let bad_method = json!({
        "campaign_id": 1,
        "metric": "ctr",
        "data_points": series(&[1.0, 2.0, 3.0]),
        "method": "astrology"
    });
    let (status, _) = post("/api/v1/anomaly/detect", Some(KEY), bad_method).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let wrong_shape = json!({"campaign_id": "one"});
    let (status, json) = post("/api/v1/forecast/predict", Some(KEY), wrong_shape).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"]["message"].is_string());
}

#[tokio::test]
async fn predict_returns_horizon_points() {
    let values: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
    let body = json!({
        "campaign_id": 3,
        "metric": "conversions",
        "historical_data": series(&values),
        "forecast_days": 5
    });
    let (status, json) = post("/api/v1/forecast/predict", Some(KEY), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["predictions"].as_array().unwrap().len(), 5);
    assert_ne!(json["model_used"], "none");
}

#[tokio::test]
async fn batch_predict_isolates_failures() {
    let good = json!({
        "campaign_id": 1,
        "metric": "spend",
        "historical_data": series(&[5.0, 6.0, 7.0, 8.0])
    });
    let bad = json!({
        "campaign_id": 2,
        "metric": "spend",
        "historical_data": [{"date": "June 1st", "value": 5.0}]
    });
    let (status, json) = post(
        "/api/v1/forecast/batch-predict",
        Some(KEY),
        json!([good, bad]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let predictions = json["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[0]["campaign_id"], 1);
    assert_eq!(predictions[1]["index"], 1);
    assert!(predictions[1]["error"].is_string());
}

#[tokio::test]
async fn batch_detect_keeps_order() {
    let items: Vec<Value> = (0..4)
        .map(|i| {
            json!({
                "campaign_id": i,
                "metric": "cpc",
                "data_points": series(&[1.0, 2.0])
            })
        })
        .collect();
    let (status, json) = post("/api/v1/anomaly/batch-detect", Some(KEY), json!(items)).await;
    assert_eq!(status, StatusCode::OK);
    let results = json["results"].as_array().unwrap();
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result["campaign_id"], i as i64);
    }
}

#[tokio::test]
async fn optimize_splits_by_roas() {
    let body = json!({
        "organization_id": 42,
        "total_budget": 1000,
        "campaigns": [
            {"campaign_id": 1, "platform": "meta", "current_budget": 500, "spend": 480,
             "revenue": 1920, "roas": 4.0, "cpa": 24.0, "conversions": 20},
            {"campaign_id": 2, "platform": "google", "current_budget": 500, "spend": 500,
             "revenue": 500, "roas": 1.0, "cpa": 50.0, "conversions": 10}
        ]
    });
    let (status, json) = post("/api/v1/budget/optimize", Some(KEY), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["recommendations"][0]["recommended_budget"], 800.0);
    assert_eq!(json["recommendations"][1]["recommended_budget"], 200.0);
}

#[tokio::test]
async fn budget_forecast_with_short_history() {
    let body = json!({
        "spend_data": series(&[100.0, 110.0, 120.0]),
        "revenue_data": series(&[300.0, 320.0, 330.0]),
        "target_roas": 2.0
    });
    let (status, json) = post("/api/v1/forecast/budget", Some(KEY), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["min_required"], 7);
    assert!(json["error"].is_string());
}
