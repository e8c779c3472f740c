//! Anomaly Detection API
//!
//! Configuration types for the detection ensemble.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use anomaly_spi::{
    AnomalyError, AnomalyRecord, AnomalyResult, DetectionMethod, DetectorKind, Direction,
    MultiMetricResult, Result, Severity,
};

// ============================================================================
// Detector Configuration
// ============================================================================

/// Isolation forest configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolationForestConfig {
    /// Number of isolation trees (default: 100).
    pub n_trees: usize,
    /// Upper bound on the per-tree sub-sample (default: 256).
    pub max_samples: usize,
    /// RNG seed; fixed so results are reproducible (default: 42).
    pub seed: u64,
    /// Shortest series the forest is fitted on (default: 10).
    pub min_points: usize,
}

impl Default for IsolationForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_samples: 256,
            seed: 42,
            min_points: 10,
        }
    }
}

impl IsolationForestConfig {
    /// Contamination fraction for a series of `n` points: 3/n clamped to [0.01, 0.2].
    pub fn contamination(n: usize) -> f64 {
        if n == 0 {
            return 0.2;
        }
        (3.0 / n as f64).clamp(0.01, 0.2)
    }
}

/// Ensemble detection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Score threshold; scores above it are flagged (default: 2.0).
    pub sensitivity: f64,
    /// Method selection (default: ensemble).
    pub method: DetectionMethod,
    /// Series shorter than this return an empty result (default: 5).
    pub min_points: usize,
    pub isolation_forest: IsolationForestConfig,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            sensitivity: 2.0,
            method: DetectionMethod::Ensemble,
            min_points: 5,
            isolation_forest: IsolationForestConfig::default(),
        }
    }
}

impl DetectionConfig {
    pub fn new(sensitivity: f64, method: DetectionMethod) -> Self {
        Self {
            sensitivity,
            method,
            ..Self::default()
        }
    }

    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_method(mut self, method: DetectionMethod) -> Self {
        self.method = method;
        self
    }

    /// Reject a non-finite sensitivity.
    pub fn validate(&self) -> Result<()> {
        validate_sensitivity(self.sensitivity)
    }
}

/// Sensitivity must be finite. Zero or negative values flag every deviation.
pub fn validate_sensitivity(sensitivity: f64) -> Result<()> {
    if sensitivity.is_finite() {
        Ok(())
    } else {
        Err(AnomalyError::InvalidParameter {
            name: "sensitivity".to_string(),
            reason: format!("must be a finite number, got {}", sensitivity),
        })
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{DetectionConfig, IsolationForestConfig};
    pub use anomaly_spi::{
        AnomalyRecord, AnomalyResult, CandidateDetector, DetectionMethod, DetectorKind,
        Direction, MultiMetricResult, Severity,
    };
}
