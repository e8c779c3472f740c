//! Metric Series Core
//!
//! Boundary validation of raw points and the descriptive statistics used by
//! the detectors and forecasters.

pub mod stats;
mod validation;

pub use stats::{describe, mean, median, percentile, population_std, round_to, rounded};
pub use validation::{parse_date, parse_value, validate};
