//! Moving average plus linear drift; the last stage of the cascade.

use forecast_spi::{ForecastError, ForecastStrategy, ModelKind, Result};
use series_core::mean;
use series_spi::MetricSeries;

/// Statistical fallback forecaster
///
/// Never fails on a non-empty series.
#[derive(Debug, Clone)]
pub struct StatisticalForecaster {
    window: usize,
}

impl StatisticalForecaster {
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    /// Forecast `horizon` values from raw observations.
    ///
    /// `ma` is the mean of the trailing window and the drift is the change
    /// from the window's first value to the last, divided by the window
    /// length. Step `k` predicts `max(0, ma + drift * k)`. An empty input
    /// forecasts zeros.
    pub fn predict_values(&self, values: &[f64], horizon: usize) -> Vec<f64> {
        if values.is_empty() {
            return vec![0.0; horizon];
        }

        let n = values.len();
        let window = self.window.min(n);
        let ma = mean(&values[n - window..]);
        let drift = if n >= 2 {
            (values[n - 1] - values[n - window]) / window as f64
        } else {
            0.0
        };

        (1..=horizon)
            .map(|k| (ma + drift * k as f64).max(0.0))
            .collect()
    }
}

impl Default for StatisticalForecaster {
    fn default() -> Self {
        Self::new(7)
    }
}

impl ForecastStrategy for StatisticalForecaster {
    fn kind(&self) -> ModelKind {
        ModelKind::Statistical
    }

    fn forecast(&self, series: &MetricSeries, horizon: usize) -> Result<Vec<f64>> {
        if series.is_empty() {
            return Err(ForecastError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        Ok(self.predict_values(&series.values(), horizon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_series_forecasts_its_level() {
        let forecast = StatisticalForecaster::default().predict_values(&[5.0; 10], 3);
        assert_eq!(forecast, vec![5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_drift_uses_window_start() {
        // window = 3: ma = 20, drift = (30 - 10) / 3
        let forecast = StatisticalForecaster::default().predict_values(&[10.0, 20.0, 30.0], 2);
        assert!((forecast[0] - (20.0 + 20.0 / 3.0)).abs() < 1e-9);
        assert!((forecast[1] - (20.0 + 40.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_negative_drift_is_floored() {
        let forecast =
            StatisticalForecaster::default().predict_values(&[70.0, 50.0, 30.0, 10.0], 5);
        assert!(forecast.iter().all(|v| *v >= 0.0));
        assert_eq!(forecast[4], 0.0);
    }

    #[test]
    fn test_single_value_has_no_drift() {
        assert_eq!(
            StatisticalForecaster::default().predict_values(&[4.0], 2),
            vec![4.0, 4.0]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            StatisticalForecaster::default().predict_values(&[], 2),
            vec![0.0, 0.0]
        );
    }
}
