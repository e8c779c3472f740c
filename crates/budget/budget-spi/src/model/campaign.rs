//! Campaign performance snapshot.

use serde::{Deserialize, Serialize};

use super::OptimizationGoal;
use crate::error::{BudgetError, Result};

/// Aggregated performance of one campaign over the reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignPerformance {
    pub campaign_id: i64,
    /// Ad platform, for example `meta` or `google`.
    pub platform: String,
    pub current_budget: f64,
    pub spend: f64,
    pub revenue: f64,
    pub roas: f64,
    pub cpa: f64,
    pub conversions: f64,
}

impl CampaignPerformance {
    /// Check every numeric field is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("current_budget", self.current_budget),
            ("spend", self.spend),
            ("revenue", self.revenue),
            ("roas", self.roas),
            ("cpa", self.cpa),
            ("conversions", self.conversions),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(BudgetError::InvalidCampaign {
                    campaign_id: self.campaign_id,
                    reason: format!("{} must be a non-negative number, got {}", name, value),
                });
            }
        }
        Ok(())
    }

    /// The metric a goal optimizes, or `None` for an unrecognized goal.
    pub fn metric(&self, goal: &OptimizationGoal) -> Option<f64> {
        match goal {
            OptimizationGoal::Roas => Some(self.roas),
            OptimizationGoal::Cpa => Some(self.cpa),
            OptimizationGoal::Conversions => Some(self.conversions),
            OptimizationGoal::Other(_) => None,
        }
    }
}
