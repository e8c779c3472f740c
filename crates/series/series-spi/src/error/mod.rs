//! Error types for metric series.

mod series_error;

pub use series_error::{Result, SeriesError};
