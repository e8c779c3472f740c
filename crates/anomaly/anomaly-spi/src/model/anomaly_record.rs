//! A single flagged observation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DetectorKind;

/// Alert severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Critical,
}

impl Severity {
    /// Critical when the score exceeds 1.5x the sensitivity.
    pub fn from_score(score: f64, sensitivity: f64) -> Self {
        if score > sensitivity * 1.5 {
            Severity::Critical
        } else {
            Severity::Warning
        }
    }
}

/// Which way an observation moved relative to its expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Spike,
    Drop,
    TrendIncreasing,
    TrendDecreasing,
}

impl Direction {
    pub fn point(value: f64, expected: f64) -> Self {
        if value > expected {
            Direction::Spike
        } else {
            Direction::Drop
        }
    }

    pub fn trend(recent: f64, historical: f64) -> Self {
        if recent > historical {
            Direction::TrendIncreasing
        } else {
            Direction::TrendDecreasing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Spike => "spike",
            Direction::Drop => "drop",
            Direction::TrendIncreasing => "trend_increasing",
            Direction::TrendDecreasing => "trend_decreasing",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An anomalous date.
///
/// Candidates carry only their own detector in `detected_by`; after
/// deduplication it holds every detector that flagged the date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub date: NaiveDate,
    pub value: f64,
    pub expected_value: f64,
    pub deviation: f64,
    pub deviation_percent: f64,
    pub severity: Severity,
    pub direction: Direction,
    pub method: DetectorKind,
    pub detected_by: Vec<DetectorKind>,
}
