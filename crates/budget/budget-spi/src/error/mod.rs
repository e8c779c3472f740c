//! Error types for budget operations.

mod budget_error;

pub use budget_error::{BudgetError, Result};
