//! Budget Facade
//!
//! Unified re-exports for the budget module:
//! - `allocator` - efficiency-based split of a total budget
//! - `returns` - diminishing-returns daily budget projection

// Re-export everything from SPI (traits, errors, types)
pub use budget_spi::*;

// Re-export everything from API (configs)
pub use budget_api::{prelude, AllocatorConfig, ReturnsConfig};

// Re-export everything from Core (implementations)
pub use budget_core::*;
