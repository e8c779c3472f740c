//! Contract definitions for anomaly detection.
//!
//! This module contains trait definitions that detectors must implement.

mod candidate_detector;

pub use candidate_detector::{CandidateDetector, DetectionInput};
