//! Cross-metric correlation types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AnomalyResult, Direction, Severity};

/// One metric's contribution to a correlated date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedMetric {
    pub metric: String,
    pub severity: Severity,
    pub direction: Direction,
    pub deviation: f64,
}

/// A date on which two or more metrics were anomalous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelatedAnomalyGroup {
    pub date: NaiveDate,
    pub affected_metrics: Vec<AffectedMetric>,
    pub metric_count: usize,
    /// At least half of the analyzed metrics were affected.
    pub likely_systemic: bool,
}

/// Result of multi-metric detection for a campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiMetricResult {
    pub campaign_id: i64,
    pub per_metric: BTreeMap<String, AnomalyResult>,
    /// Sorted by metric count, largest first.
    pub correlated_anomalies: Vec<CorrelatedAnomalyGroup>,
    pub systemic_issues: Vec<CorrelatedAnomalyGroup>,
    pub total_anomalies: usize,
}
