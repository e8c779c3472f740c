//! Metric Series Service Provider Interface
//!
//! Defines the time-series value types shared by every analytics component.

pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use error::{Result, SeriesError};
pub use model::{DataPoint, MetricSeries, RawDataPoint, RawValue, SeriesStats, DATE_FORMAT};
