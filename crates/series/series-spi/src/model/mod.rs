//! Data models for metric series.

mod data_point;
mod metric_series;
mod series_stats;

pub use data_point::{DataPoint, RawDataPoint, RawValue, DATE_FORMAT};
pub use metric_series::MetricSeries;
pub use series_stats::SeriesStats;
