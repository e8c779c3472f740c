//! Anomaly detection result types.

use serde::{Deserialize, Serialize};
use series_spi::SeriesStats;

use super::AnomalyRecord;

/// Outcome of running detection over one (campaign, metric) series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyResult {
    pub campaign_id: i64,
    pub metric: String,
    /// Deduplicated records ordered by date.
    pub anomalies: Vec<AnomalyRecord>,
    pub is_anomalous: bool,
    pub anomaly_count: usize,
    pub summary: String,
    /// Absent when detection did not run (too few points, zero variance).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<SeriesStats>,
}

impl AnomalyResult {
    /// Empty, non-anomalous result with an explanatory summary.
    pub fn empty(campaign_id: i64, metric: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            campaign_id,
            metric: metric.into(),
            anomalies: Vec::new(),
            is_anomalous: false,
            anomaly_count: 0,
            summary: summary.into(),
            statistics: None,
        }
    }

    /// Count of critical records.
    pub fn critical_count(&self) -> usize {
        self.anomalies
            .iter()
            .filter(|a| a.severity == super::Severity::Critical)
            .count()
    }
}
