//! Budget projection types.

use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, Result};

/// Optional bounds on the recommended daily budget.
///
/// Each unset bound defaults independently from the trailing average spend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl BudgetRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, bound) in [("budget_range.min", self.min), ("budget_range.max", self.max)] {
            if let Some(value) = bound {
                if !value.is_finite() || value < 0.0 {
                    return Err(BudgetError::InvalidParameter {
                        name: name.to_string(),
                        reason: format!("must be a non-negative number, got {}", value),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Projection at one spend level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetScenario {
    pub daily_budget: f64,
    pub projected_revenue: f64,
    pub projected_roas: f64,
    pub budget_change_percent: f64,
}

/// How much history backs the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastConfidence {
    Medium,
    Low,
}

/// Diminishing-returns projection for a daily budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetForecast {
    pub current_daily_spend: f64,
    pub current_daily_revenue: f64,
    pub current_roas: f64,
    pub target_roas: f64,
    pub recommended_daily_budget: f64,
    pub projected_daily_revenue: f64,
    pub budget_change_percent: f64,
    pub scenarios: Vec<BudgetScenario>,
    pub confidence: ForecastConfidence,
}

/// Labelled payload returned instead of a projection when history is short.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsufficientBudgetData {
    pub error: String,
    pub min_required: usize,
}

/// Either a projection or the insufficient-data payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BudgetForecastOutcome {
    Forecast(BudgetForecast),
    InsufficientData(InsufficientBudgetData),
}

impl BudgetForecastOutcome {
    pub fn insufficient_data(min_required: usize) -> Self {
        BudgetForecastOutcome::InsufficientData(InsufficientBudgetData {
            error: "Insufficient data for budget forecasting".to_string(),
            min_required,
        })
    }

    pub fn forecast(&self) -> Option<&BudgetForecast> {
        match self {
            BudgetForecastOutcome::Forecast(forecast) => Some(forecast),
            BudgetForecastOutcome::InsufficientData(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_payload_is_flat() {
        let json = serde_json::to_value(BudgetForecastOutcome::insufficient_data(7)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": "Insufficient data for budget forecasting",
                "min_required": 7
            })
        );
    }

    #[test]
    fn test_range_accepts_partial_bounds() {
        let range: BudgetRange = serde_json::from_str(r#"{"max": 200.0}"#).unwrap();
        assert_eq!(range, BudgetRange::new(None, Some(200.0)));
        assert!(range.validate().is_ok());
    }

    #[test]
    fn test_range_rejects_negative() {
        assert!(BudgetRange::new(Some(-5.0), None).validate().is_err());
    }

    #[test]
    fn test_confidence_wire_names() {
        assert_eq!(
            serde_json::to_string(&ForecastConfidence::Medium).unwrap(),
            "\"medium\""
        );
    }
}
