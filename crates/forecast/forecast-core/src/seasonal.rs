//! Date-aware linear trend with additive day-of-week factors.
//!
//! Time is measured in days since the first observation, so gaps in the
//! series stretch the trend axis instead of being ignored.

use chrono::{Datelike, Days, NaiveDate};
use forecast_spi::{ForecastError, ForecastStrategy, ModelKind, Result};
use series_spi::MetricSeries;

const DAYS_PER_WEEK: usize = 7;

/// Seasonal regression forecaster
///
/// Fits `y = a + b*t` by least squares, then takes the mean de-trended
/// residual of each weekday as its seasonal factor. Factors are centered so
/// they sum to zero over the weekdays actually observed.
#[derive(Debug, Clone)]
pub struct SeasonalRegressionForecaster {
    min_points: usize,
}

impl SeasonalRegressionForecaster {
    /// Create a forecaster requiring at least `min_points` observations.
    pub fn new(min_points: usize) -> Result<Self> {
        if min_points < 2 * DAYS_PER_WEEK {
            return Err(ForecastError::InvalidParameter {
                name: "min_points".to_string(),
                reason: format!("must cover two weekly cycles ({})", 2 * DAYS_PER_WEEK),
            });
        }
        Ok(Self { min_points })
    }

    pub fn min_points(&self) -> usize {
        self.min_points
    }

    /// Fit the trend and weekday factors.
    pub fn fit(&self, series: &MetricSeries) -> Result<SeasonalFit> {
        if series.len() < self.min_points {
            return Err(ForecastError::InsufficientData {
                required: self.min_points,
                actual: series.len(),
            });
        }

        let origin = series.first_date().ok_or(ForecastError::InsufficientData {
            required: self.min_points,
            actual: 0,
        })?;

        let t: Vec<f64> = series
            .points()
            .iter()
            .map(|p| (p.date - origin).num_days() as f64)
            .collect();
        let y = series.values();
        let n = y.len() as f64;

        let t_mean = t.iter().sum::<f64>() / n;
        let y_mean = y.iter().sum::<f64>() / n;

        let sxx: f64 = t.iter().map(|ti| (ti - t_mean).powi(2)).sum();
        if sxx == 0.0 {
            return Err(ForecastError::NumericalError(
                "time axis has zero variance".to_string(),
            ));
        }
        let sxy: f64 = t
            .iter()
            .zip(&y)
            .map(|(ti, yi)| (ti - t_mean) * (yi - y_mean))
            .sum();

        let slope = sxy / sxx;
        let intercept = y_mean - slope * t_mean;

        // Step 2: mean residual per weekday
        let mut sums = [0.0; DAYS_PER_WEEK];
        let mut counts = [0usize; DAYS_PER_WEEK];
        for ((point, ti), yi) in series.points().iter().zip(&t).zip(&y) {
            let day = weekday_index(point.date);
            sums[day] += yi - (intercept + slope * ti);
            counts[day] += 1;
        }

        let mut factors = [0.0; DAYS_PER_WEEK];
        let mut observed = 0usize;
        for day in 0..DAYS_PER_WEEK {
            if counts[day] > 0 {
                factors[day] = sums[day] / counts[day] as f64;
                observed += 1;
            }
        }

        // Step 3: center over observed weekdays
        if observed > 0 {
            let shift = factors.iter().sum::<f64>() / observed as f64;
            for day in 0..DAYS_PER_WEEK {
                if counts[day] > 0 {
                    factors[day] -= shift;
                }
            }
        }

        if !slope.is_finite() || !intercept.is_finite() || factors.iter().any(|f| !f.is_finite()) {
            return Err(ForecastError::NumericalError(
                "non-finite regression coefficients".to_string(),
            ));
        }

        Ok(SeasonalFit {
            origin,
            intercept,
            slope,
            factors,
        })
    }
}

impl Default for SeasonalRegressionForecaster {
    fn default() -> Self {
        Self {
            min_points: 2 * DAYS_PER_WEEK,
        }
    }
}

impl ForecastStrategy for SeasonalRegressionForecaster {
    fn kind(&self) -> ModelKind {
        ModelKind::SeasonalRegression
    }

    fn forecast(&self, series: &MetricSeries, horizon: usize) -> Result<Vec<f64>> {
        let fit = self.fit(series)?;
        let last = series.last_date().ok_or(ForecastError::InsufficientData {
            required: self.min_points,
            actual: 0,
        })?;

        (1..=horizon as u64)
            .map(|k| {
                let date = last.checked_add_days(Days::new(k)).ok_or_else(|| {
                    ForecastError::NumericalError("forecast date out of range".to_string())
                })?;
                Ok(fit.value_at(date))
            })
            .collect()
    }
}

/// Fitted seasonal regression coefficients
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalFit {
    origin: NaiveDate,
    intercept: f64,
    slope: f64,
    factors: [f64; DAYS_PER_WEEK],
}

impl SeasonalFit {
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Trend change per day
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Additive factor per weekday, Monday first
    pub fn factors(&self) -> &[f64; DAYS_PER_WEEK] {
        &self.factors
    }

    pub fn value_at(&self, date: NaiveDate) -> f64 {
        let t = (date - self.origin).num_days() as f64;
        self.intercept + self.slope * t + self.factors[weekday_index(date)]
    }
}

fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}
