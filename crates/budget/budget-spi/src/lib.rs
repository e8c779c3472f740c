//! Budget Service Provider Interface
//!
//! Campaign performance input, allocation and projection result types, and
//! the contracts implemented by the allocator and the returns model.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{BudgetOptimizer, BudgetProjector};
pub use error::{BudgetError, Result};
pub use model::{
    BudgetForecast, BudgetForecastOutcome, BudgetOptimization, BudgetRange,
    BudgetRecommendation, BudgetScenario, CampaignPerformance, ExpectedImprovement,
    ForecastConfidence, InsufficientBudgetData, OptimizationGoal,
};
