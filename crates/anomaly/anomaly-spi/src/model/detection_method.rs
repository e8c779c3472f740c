//! Detection strategy selection.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnomalyError;

/// Method requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    #[serde(rename = "zscore")]
    ZScore,
    Rolling,
    IsolationForest,
    #[default]
    Ensemble,
}

impl DetectionMethod {
    /// Whether the detector runs under this method.
    ///
    /// Trend-shift detection is not selectable and runs under every method.
    pub fn includes(&self, kind: DetectorKind) -> bool {
        match (self, kind) {
            (_, DetectorKind::TrendDetection) => true,
            (DetectionMethod::Ensemble, _) => true,
            (DetectionMethod::ZScore, DetectorKind::ZScore) => true,
            (DetectionMethod::Rolling, DetectorKind::RollingWindow) => true,
            (DetectionMethod::IsolationForest, DetectorKind::IsolationForest) => true,
            _ => false,
        }
    }
}

impl FromStr for DetectionMethod {
    type Err = AnomalyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zscore" => Ok(DetectionMethod::ZScore),
            "rolling" => Ok(DetectionMethod::Rolling),
            "isolation_forest" => Ok(DetectionMethod::IsolationForest),
            "ensemble" => Ok(DetectionMethod::Ensemble),
            other => Err(AnomalyError::InvalidParameter {
                name: "method".to_string(),
                reason: format!(
                    "unknown method '{}', expected zscore, rolling, isolation_forest or ensemble",
                    other
                ),
            }),
        }
    }
}

/// The detector that produced a candidate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    #[serde(rename = "zscore")]
    ZScore,
    RollingWindow,
    IsolationForest,
    TrendDetection,
}

impl DetectorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectorKind::ZScore => "zscore",
            DetectorKind::RollingWindow => "rolling_window",
            DetectorKind::IsolationForest => "isolation_forest",
            DetectorKind::TrendDetection => "trend_detection",
        }
    }
}

impl std::fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
