//! Budget error types.

use thiserror::Error;

/// Malformed allocator or projector input.
///
/// Short histories and empty rosters are labelled results, never errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Invalid campaign {campaign_id}: {reason}")]
    InvalidCampaign { campaign_id: i64, reason: String },
}

/// Result type alias for budget operations.
pub type Result<T> = std::result::Result<T, BudgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let error = BudgetError::InvalidParameter {
            name: "total_budget".to_string(),
            reason: "must be non-negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid parameter: total_budget - must be non-negative"
        );
    }

    #[test]
    fn test_invalid_campaign_display() {
        let error = BudgetError::InvalidCampaign {
            campaign_id: 12,
            reason: "spend must be a non-negative number, got -3".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid campaign 12: spend must be a non-negative number, got -3"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BudgetError>();
    }
}
