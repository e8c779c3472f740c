//! Forecast result types.

use serde::{Deserialize, Serialize};

use super::{ForecastPoint, ModelKind, TrendDirection};

/// Headline numbers reported alongside the predictions.
///
/// Averages and trend are absent on the insufficient-data result, which
/// carries a `confidence` label instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_avg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecasted_avg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_direction: Option<TrendDirection>,
    pub data_points: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
}

/// Forecast for one (campaign, metric) series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub campaign_id: i64,
    pub metric: String,
    pub predictions: Vec<ForecastPoint>,
    pub confidence: f64,
    pub model_used: ModelKind,
    pub summary: ForecastSummary,
}

impl ForecastResult {
    /// Result for a series too short to forecast.
    pub fn insufficient_data(campaign_id: i64, metric: impl Into<String>) -> Self {
        Self {
            campaign_id,
            metric: metric.into(),
            predictions: Vec::new(),
            confidence: 0.0,
            model_used: ModelKind::None,
            summary: ForecastSummary {
                data_points: 0,
                confidence: Some("none".to_string()),
                ..ForecastSummary::default()
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_wire_shape() {
        let result = ForecastResult::insufficient_data(9, "spend");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["model_used"], "none");
        assert_eq!(json["confidence"], 0.0);
        assert_eq!(json["predictions"].as_array().unwrap().len(), 0);
        assert_eq!(
            json["summary"],
            serde_json::json!({"data_points": 0, "confidence": "none"})
        );
    }
}
