//! Descriptive statistics of a series.

use serde::{Deserialize, Serialize};

/// Summary statistics reported alongside analysis results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}
