//! Model and trend labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which stage of the cascade produced a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    SeasonalRegression,
    GradientBoosting,
    Statistical,
    /// No model ran (too little history).
    None,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::SeasonalRegression => "seasonal_regression",
            ModelKind::GradientBoosting => "gradient_boosting",
            ModelKind::Statistical => "statistical",
            ModelKind::None => "none",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of recent movement relative to older history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}
