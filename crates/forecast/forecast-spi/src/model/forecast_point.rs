//! Single dated prediction with its interval.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One step of a forecast horizon.
///
/// `lower_bound` is never negative; campaign metrics cannot go below zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_value: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl ForecastPoint {
    /// Width of the prediction interval.
    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower_bound && value <= self.upper_bound
    }
}
