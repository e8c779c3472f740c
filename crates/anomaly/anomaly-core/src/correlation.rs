//! Cross-metric correlation of anomaly dates.

use std::collections::BTreeMap;

use anomaly_spi::{
    AffectedMetric, AnomalyResult, CorrelatedAnomalyGroup, DetectionMethod, MultiMetricResult,
};
use chrono::NaiveDate;
use rayon::prelude::*;
use series_spi::MetricSeries;

use crate::engine::AnomalyEngine;

/// Finds dates on which several metrics of one campaign were anomalous.
#[derive(Debug, Default)]
pub struct CorrelationAnalyzer {
    engine: AnomalyEngine,
}

impl CorrelationAnalyzer {
    pub fn new(engine: AnomalyEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &AnomalyEngine {
        &self.engine
    }

    /// Run ensemble detection per metric and group the results by date.
    ///
    /// Metrics are analyzed in parallel; each is independent.
    pub fn detect_multi(
        &self,
        campaign_id: i64,
        metrics: &BTreeMap<String, MetricSeries>,
        sensitivity: f64,
    ) -> MultiMetricResult {
        let per_metric: BTreeMap<String, AnomalyResult> = metrics
            .par_iter()
            .map(|(name, series)| {
                let result = self.engine.detect_with(
                    campaign_id,
                    name,
                    series,
                    sensitivity,
                    DetectionMethod::Ensemble,
                );
                (name.clone(), result)
            })
            .collect();

        let correlated_anomalies = correlate(&per_metric, metrics.len());
        let systemic_issues = correlated_anomalies
            .iter()
            .filter(|group| group.likely_systemic)
            .cloned()
            .collect();
        let total_anomalies = per_metric.values().map(|r| r.anomaly_count).sum();

        MultiMetricResult {
            campaign_id,
            per_metric,
            correlated_anomalies,
            systemic_issues,
            total_anomalies,
        }
    }
}

/// Group per-metric records by date, keeping dates hit by two or more metrics.
///
/// Groups are ordered by metric count descending; ties stay in date order.
pub fn correlate(
    per_metric: &BTreeMap<String, AnomalyResult>,
    total_metrics: usize,
) -> Vec<CorrelatedAnomalyGroup> {
    let mut by_date: BTreeMap<NaiveDate, Vec<AffectedMetric>> = BTreeMap::new();
    for (metric, result) in per_metric {
        for record in &result.anomalies {
            by_date.entry(record.date).or_default().push(AffectedMetric {
                metric: metric.clone(),
                severity: record.severity,
                direction: record.direction,
                deviation: record.deviation,
            });
        }
    }

    let mut groups: Vec<CorrelatedAnomalyGroup> = by_date
        .into_iter()
        .filter(|(_, affected)| affected.len() >= 2)
        .map(|(date, affected_metrics)| {
            let metric_count = affected_metrics.len();
            CorrelatedAnomalyGroup {
                date,
                affected_metrics,
                metric_count,
                likely_systemic: metric_count as f64 >= total_metrics as f64 * 0.5,
            }
        })
        .collect();

    groups.sort_by(|a, b| b.metric_count.cmp(&a.metric_count));
    groups
}
