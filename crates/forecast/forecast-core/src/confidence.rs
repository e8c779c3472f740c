//! Prediction intervals and confidence scoring.

use chrono::{Days, NaiveDate};
use forecast_spi::ForecastPoint;
use series_core::{population_std, round_to};

/// Two-sided 95% normal quantile.
const Z_95: f64 = 1.96;

/// Half-width of every prediction interval: 1.96 x (0.5 x population std).
pub fn interval_half_width(values: &[f64]) -> f64 {
    Z_95 * 0.5 * population_std(values)
}

/// Confidence grows by 0.01 per observation from 0.5 and caps at 0.95.
pub fn confidence_score(n_points: usize) -> f64 {
    round_to((0.5 + 0.01 * n_points as f64).min(0.95), 2)
}

/// Date each prediction and attach its interval.
///
/// Dates run consecutively from the day after `last_date`. Lower bounds are
/// floored at zero. Values are rounded to 4 decimals.
pub fn to_forecast_points(
    last_date: NaiveDate,
    predictions: &[f64],
    half_width: f64,
) -> Vec<ForecastPoint> {
    predictions
        .iter()
        .zip(1u64..)
        .map_while(|(&p, k)| {
            let date = last_date.checked_add_days(Days::new(k))?;
            Some(ForecastPoint {
                date,
                predicted_value: round_to(p, 4),
                lower_bound: round_to((p - half_width).max(0.0), 4),
                upper_bound: round_to(p + half_width, 4),
            })
        })
        .collect()
}
