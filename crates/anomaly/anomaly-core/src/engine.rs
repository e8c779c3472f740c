//! Ensemble engine: runs the selected detectors and merges their output.

use anomaly_api::DetectionConfig;
use anomaly_spi::{AnomalyResult, CandidateDetector, DetectionInput, DetectionMethod};
use series_core::{describe, mean, population_std, rounded};
use series_spi::MetricSeries;

use crate::dedup::deduplicate;
use crate::detectors::{RollingWindowDetector, TrendShiftDetector, ZScoreDetector};
use crate::isolation_forest::IsolationForestDetector;
use crate::summary::{insufficient_data_summary, no_variance_summary, summarize};

/// Multi-method anomaly detector.
///
/// Detectors run in a fixed order (z-score, rolling window, isolation
/// forest, trend shift). A detector that returns an error is logged and
/// skipped; detection as a whole never fails.
pub struct AnomalyEngine {
    config: DetectionConfig,
    detectors: Vec<Box<dyn CandidateDetector>>,
}

impl AnomalyEngine {
    /// Create an engine with the standard detector set.
    pub fn new(config: DetectionConfig) -> Self {
        let detectors: Vec<Box<dyn CandidateDetector>> = vec![
            Box::new(ZScoreDetector),
            Box::new(RollingWindowDetector::default()),
            Box::new(IsolationForestDetector::new(config.isolation_forest.clone())),
            Box::new(TrendShiftDetector::default()),
        ];
        Self { config, detectors }
    }

    /// Create an engine with an explicit detector list.
    pub fn with_detectors(config: DetectionConfig, detectors: Vec<Box<dyn CandidateDetector>>) -> Self {
        Self { config, detectors }
    }

    pub fn with_defaults() -> Self {
        Self::new(DetectionConfig::default())
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detect with the configured sensitivity and method.
    pub fn detect(&self, campaign_id: i64, metric: &str, series: &MetricSeries) -> AnomalyResult {
        self.detect_with(
            campaign_id,
            metric,
            series,
            self.config.sensitivity,
            self.config.method,
        )
    }

    /// Detect with an explicit sensitivity and method.
    pub fn detect_with(
        &self,
        campaign_id: i64,
        metric: &str,
        series: &MetricSeries,
        sensitivity: f64,
        method: DetectionMethod,
    ) -> AnomalyResult {
        if series.len() < self.config.min_points {
            return AnomalyResult::empty(
                campaign_id,
                metric,
                insufficient_data_summary(self.config.min_points),
            );
        }

        let values = series.values();
        let dates = series.dates();
        let std = population_std(&values);
        if std == 0.0 {
            return AnomalyResult::empty(campaign_id, metric, no_variance_summary(metric));
        }

        let input = DetectionInput {
            dates: &dates,
            values: &values,
            mean: mean(&values),
            std,
        };

        let mut candidates = Vec::new();
        for detector in &self.detectors {
            let kind = detector.kind();
            if !method.includes(kind) {
                continue;
            }
            if input.len() < detector.min_points() {
                tracing::debug!(detector = %kind, points = input.len(), "series too short for detector");
                continue;
            }
            match detector.detect(&input, sensitivity) {
                Ok(records) => {
                    tracing::debug!(detector = %kind, candidates = records.len(), "detector finished");
                    candidates.extend(records);
                }
                Err(e) => {
                    tracing::warn!(detector = %kind, error = %e, "detector failed, skipping");
                }
            }
        }

        let anomalies = deduplicate(candidates);
        let summary = summarize(campaign_id, metric, &anomalies);

        AnomalyResult {
            campaign_id,
            metric: metric.to_string(),
            is_anomalous: !anomalies.is_empty(),
            anomaly_count: anomalies.len(),
            anomalies,
            summary,
            statistics: describe(&values).map(|stats| rounded(&stats)),
        }
    }
}

impl Default for AnomalyEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for AnomalyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnomalyEngine")
            .field("config", &self.config)
            .field(
                "detectors",
                &self.detectors.iter().map(|d| d.kind()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
