//! Conversion of wire points into ordered series.

use chrono::NaiveDate;
use series_spi::{DataPoint, MetricSeries, RawDataPoint, RawValue, Result, SeriesError, DATE_FORMAT};

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| SeriesError::InvalidDate {
        value: value.to_string(),
    })
}

/// Parse a numeric value. Non-finite values are rejected.
pub fn parse_value(value: &RawValue) -> std::result::Result<f64, String> {
    let parsed = match value {
        RawValue::Number(n) => *n,
        RawValue::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("value '{}' is not numeric", text))?,
    };
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(format!("value {} is not finite", parsed))
    }
}

/// Validate raw points into a [`MetricSeries`].
///
/// Points are sorted by date (stable). When a date repeats, the last
/// occurrence in input order wins.
pub fn validate(raw: &[RawDataPoint]) -> Result<MetricSeries> {
    let mut points = Vec::with_capacity(raw.len());
    for (index, point) in raw.iter().enumerate() {
        let date = parse_date(&point.date).map_err(|e| SeriesError::InvalidPoint {
            index,
            reason: e.to_string(),
        })?;
        let value = parse_value(&point.value)
            .map_err(|reason| SeriesError::InvalidPoint { index, reason })?;
        points.push(DataPoint::new(date, value));
    }

    points.sort_by_key(|p| p.date);

    let mut ordered: Vec<DataPoint> = Vec::with_capacity(points.len());
    for point in points {
        match ordered.last_mut() {
            Some(last) if last.date == point.date => *last = point,
            _ => ordered.push(point),
        }
    }

    let dropped = raw.len() - ordered.len();
    if dropped > 0 {
        tracing::warn!(dropped, "duplicate dates in series, keeping last occurrence");
    }

    Ok(MetricSeries::from_ordered(ordered))
}
