//! Data models for budget allocation and projection.

mod campaign;
mod forecast;
mod goal;
mod optimization;

pub use campaign::CampaignPerformance;
pub use forecast::{
    BudgetForecast, BudgetForecastOutcome, BudgetRange, BudgetScenario, ForecastConfidence,
    InsufficientBudgetData,
};
pub use goal::OptimizationGoal;
pub use optimization::{BudgetOptimization, BudgetRecommendation, ExpectedImprovement};
