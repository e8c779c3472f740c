//! Anomaly Detection Core
//!
//! Detector implementations, the ensemble engine that merges their output,
//! and cross-metric correlation.

mod correlation;
mod dedup;
mod detectors;
mod engine;
mod isolation_forest;
mod summary;

pub use correlation::*;
pub use dedup::*;
pub use detectors::*;
pub use engine::*;
pub use isolation_forest::*;
pub use summary::*;
