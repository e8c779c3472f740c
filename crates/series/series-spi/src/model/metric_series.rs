//! Ordered metric series.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::DataPoint;

/// Sequence of observations ordered by date ascending with no repeated dates.
///
/// Construct through `series_core::validate` at a boundary, or with
/// [`MetricSeries::daily`] for contiguous daily data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricSeries {
    points: Vec<DataPoint>,
}

impl MetricSeries {
    /// Wrap points that are already date-ordered and unique.
    pub fn from_ordered(points: Vec<DataPoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].date < w[1].date));
        Self { points }
    }

    /// Build a contiguous daily series starting at `start`.
    pub fn daily(start: NaiveDate, values: &[f64]) -> Self {
        let points = values
            .iter()
            .enumerate()
            .filter_map(|(i, &value)| {
                start
                    .checked_add_days(Days::new(i as u64))
                    .map(|date| DataPoint::new(date, value))
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_daily_builds_contiguous_dates() {
        let series = MetricSeries::daily(jan(30), &[1.0, 2.0, 3.0]);
        assert_eq!(series.len(), 3);
        assert_eq!(series.first_date(), Some(jan(30)));
        assert_eq!(
            series.last_date(),
            Some(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
        );
        assert_eq!(series.values(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_empty_series() {
        let series = MetricSeries::default();
        assert!(series.is_empty());
        assert_eq!(series.last_date(), None);
    }
}
