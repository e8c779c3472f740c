//! Candidate detector trait definition.

use chrono::NaiveDate;

use crate::error::Result;
use crate::model::{AnomalyRecord, DetectorKind};

/// Series view handed to every detector in an ensemble run.
///
/// `mean` and `std` are the whole-series population statistics; `std` is
/// guaranteed non-zero by the caller.
#[derive(Debug, Clone, Copy)]
pub struct DetectionInput<'a> {
    pub dates: &'a [NaiveDate],
    pub values: &'a [f64],
    pub mean: f64,
    pub std: f64,
}

impl<'a> DetectionInput<'a> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A single detection strategy.
///
/// Implementations flag candidate records independently; merging is the
/// ensemble's job.
pub trait CandidateDetector: Send + Sync {
    /// Identifier recorded on every candidate this detector emits.
    fn kind(&self) -> DetectorKind;

    /// Shortest series this detector runs on. Shorter series are skipped.
    fn min_points(&self) -> usize;

    /// Produce candidate records.
    fn detect(&self, input: &DetectionInput<'_>, sensitivity: f64) -> Result<Vec<AnomalyRecord>>;
}
