//! Data models for anomaly detection.
//!
//! This module contains data structures used throughout the anomaly detection system.

mod anomaly_record;
mod anomaly_result;
mod correlation;
mod detection_method;

pub use anomaly_record::{AnomalyRecord, Direction, Severity};
pub use anomaly_result::AnomalyResult;
pub use correlation::{AffectedMetric, CorrelatedAnomalyGroup, MultiMetricResult};
pub use detection_method::{DetectionMethod, DetectorKind};
