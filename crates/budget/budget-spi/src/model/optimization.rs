//! Allocation result types.

use serde::{Deserialize, Serialize};

/// Recommended budget for one campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecommendation {
    pub campaign_id: i64,
    pub platform: String,
    pub current_budget: f64,
    pub recommended_budget: f64,
    /// Percent change from the current budget, 1 decimal.
    pub change_percent: f64,
    pub reason: String,
}

/// Goal metric before and after reallocation.
///
/// The current value is weighted by current budgets, the expected value by
/// efficiency scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedImprovement {
    pub metric: String,
    pub current_weighted_value: f64,
    pub expected_weighted_value: f64,
    pub improvement_percent: f64,
}

/// Allocation across an organization's campaigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetOptimization {
    pub organization_id: i64,
    pub total_budget: f64,
    /// Ordered by efficiency, best first.
    pub recommendations: Vec<BudgetRecommendation>,
    /// Absent for an empty roster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_improvement: Option<ExpectedImprovement>,
    pub summary: String,
}

impl BudgetOptimization {
    /// Response for a request with no campaigns.
    pub fn empty(organization_id: i64, total_budget: f64) -> Self {
        Self {
            organization_id,
            total_budget,
            recommendations: Vec::new(),
            expected_improvement: None,
            summary: "No campaigns provided for optimization.".to_string(),
        }
    }

    pub fn total_recommended(&self) -> f64 {
        self.recommendations.iter().map(|r| r.recommended_budget).sum()
    }
}
