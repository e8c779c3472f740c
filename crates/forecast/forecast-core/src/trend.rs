//! Recent-versus-older trend labelling.

use forecast_spi::TrendDirection;
use series_core::mean;

const RECENT: usize = 7;

/// Compare the mean of the last 7 values against older history.
///
/// Older history is the preceding 7 values when at least 14 exist, otherwise
/// the first half of the series. A 5% band around the older mean is stable.
pub fn trend_direction(values: &[f64]) -> TrendDirection {
    let n = values.len();
    if n < RECENT {
        return TrendDirection::Stable;
    }

    let recent = mean(&values[n - RECENT..]);
    let older = if n >= 2 * RECENT {
        mean(&values[n - 2 * RECENT..n - RECENT])
    } else {
        mean(&values[..n / 2])
    };

    if recent > older * 1.05 {
        TrendDirection::Increasing
    } else if recent < older * 0.95 {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_series_is_stable() {
        assert_eq!(trend_direction(&[1.0, 50.0, 100.0]), TrendDirection::Stable);
    }

    #[test]
    fn test_uses_previous_week_when_available() {
        let mut values = vec![100.0; 7];
        values.extend(vec![120.0; 7]);
        assert_eq!(trend_direction(&values), TrendDirection::Increasing);

        let mut values = vec![100.0; 7];
        values.extend(vec![90.0; 7]);
        assert_eq!(trend_direction(&values), TrendDirection::Decreasing);
    }

    #[test]
    fn test_uses_first_half_for_short_history() {
        // n = 10: older = first 5 values
        let values = [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.4, 10.4, 10.4];
        assert_eq!(trend_direction(&values), TrendDirection::Stable);
    }
}
