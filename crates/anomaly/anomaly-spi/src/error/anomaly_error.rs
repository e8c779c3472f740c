//! Anomaly detection error types.

use thiserror::Error;

/// Anomaly detection errors.
///
/// Detectors return these to the ensemble, which logs and skips the failing
/// method. Only `InvalidParameter` reaches callers, from boundary parsing.
#[derive(Debug, Error)]
pub enum AnomalyError {
    #[error("Insufficient data: required {required}, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Detection error: {0}")]
    DetectionError(String),
}

/// Result type for anomaly detection operations.
pub type Result<T> = std::result::Result<T, AnomalyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_display() {
        let error = AnomalyError::InsufficientData {
            required: 10,
            got: 4,
        };
        assert_eq!(error.to_string(), "Insufficient data: required 10, got 4");
    }

    #[test]
    fn test_invalid_parameter_display() {
        let error = AnomalyError::InvalidParameter {
            name: "sensitivity".to_string(),
            reason: "must be positive".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid parameter: sensitivity - must be positive"
        );
    }

    #[test]
    fn test_detection_error_display() {
        let error = AnomalyError::DetectionError("non-finite value".to_string());
        assert_eq!(error.to_string(), "Detection error: non-finite value");
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: Box<dyn std::error::Error> =
            Box::new(AnomalyError::DetectionError("fit".to_string()));
        assert!(!error.to_string().is_empty());
    }

    #[test]
    fn test_all_error_variants_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnomalyError>();
    }
}
