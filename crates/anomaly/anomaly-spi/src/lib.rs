//! Anomaly Detection Service Provider Interface
//!
//! Defines the detector contract and the record/result types shared by the
//! ensemble and the correlation analyzer.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{CandidateDetector, DetectionInput};
pub use error::{AnomalyError, Result};
pub use model::{
    AffectedMetric, AnomalyRecord, AnomalyResult, CorrelatedAnomalyGroup, DetectionMethod,
    DetectorKind, Direction, MultiMetricResult, Severity,
};
