//! Series validation error types.

use thiserror::Error;

/// Errors raised while turning wire input into a [`MetricSeries`](crate::MetricSeries).
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("Invalid data point at index {index}: {reason}")]
    InvalidPoint { index: usize, reason: String },

    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },
}

/// Result type for series operations.
pub type Result<T> = std::result::Result<T, SeriesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_point_display() {
        let error = SeriesError::InvalidPoint {
            index: 3,
            reason: "value 'abc' is not numeric".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid data point at index 3: value 'abc' is not numeric"
        );
    }

    #[test]
    fn test_invalid_date_display() {
        let error = SeriesError::InvalidDate {
            value: "2024/01/01".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date '2024/01/01': expected YYYY-MM-DD"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SeriesError>();
    }
}
