//! Budget optimizer trait.

use crate::error::Result;
use crate::model::{BudgetOptimization, CampaignPerformance, OptimizationGoal};

/// Splits a total budget across campaigns.
pub trait BudgetOptimizer: Send + Sync {
    /// Allocate `total_budget` across `campaigns` for `goal`.
    ///
    /// Errors only on malformed input; an empty roster is a normal result.
    fn optimize(
        &self,
        organization_id: i64,
        total_budget: f64,
        campaigns: &[CampaignPerformance],
        goal: &OptimizationGoal,
    ) -> Result<BudgetOptimization>;
}
