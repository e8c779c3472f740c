//! Contract definitions for budget operations.

mod budget_optimizer;
mod budget_projector;

pub use budget_optimizer::BudgetOptimizer;
pub use budget_projector::BudgetProjector;
