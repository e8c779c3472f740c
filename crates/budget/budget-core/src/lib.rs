//! Budget Core
//!
//! Implementations of the budget contracts:
//! - `allocator` - efficiency-proportional split of a total budget
//! - `returns` - log-linear returns curve and daily budget scenarios

pub mod allocator;
pub mod returns;

// Re-export SPI types for implementations
pub use budget_spi::{BudgetError, BudgetOptimizer, BudgetProjector, Result};

pub use allocator::{efficiency_score, format_currency, BudgetAllocator};
pub use returns::{BudgetReturnsModel, ReturnsCurve};
