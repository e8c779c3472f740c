//! Dated observations, validated and on the wire.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar date format used on the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single validated observation of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl DataPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Numeric value as it arrives from callers: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// Unvalidated `{date, value}` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDataPoint {
    pub date: String,
    pub value: RawValue,
}

impl RawDataPoint {
    pub fn new(date: impl Into<String>, value: impl Into<RawValue>) -> Self {
        Self {
            date: date.into(),
            value: value.into(),
        }
    }
}
