//! Metric Series Facade
//!
//! Single entry point for the series types, boundary validation and
//! statistics helpers.

// Re-export everything from SPI
pub use series_spi::*;

// Re-export everything from Core
pub use series_core::*;
