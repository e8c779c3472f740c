//! Deterministic text summaries of detection results.

use anomaly_spi::{AnomalyRecord, Severity};

/// Summary for a series too short to analyze.
pub fn insufficient_data_summary(min_points: usize) -> String {
    format!(
        "Insufficient data for anomaly detection (minimum {} data points required).",
        min_points
    )
}

/// Summary for a constant series.
pub fn no_variance_summary(metric: &str) -> String {
    format!("No variance detected in {} data.", metric)
}

/// Summarize date-ordered records; the last one is reported as the latest.
pub fn summarize(campaign_id: i64, metric: &str, anomalies: &[AnomalyRecord]) -> String {
    let Some(latest) = anomalies.last() else {
        return format!("Campaign {}: {} is within normal range.", campaign_id, metric);
    };

    let critical = anomalies
        .iter()
        .filter(|a| a.severity == Severity::Critical)
        .count();
    let warnings = anomalies.len() - critical;

    let mut parts = vec![format!(
        "Campaign {}: {} anomaly(ies) detected in {}.",
        campaign_id,
        anomalies.len(),
        metric
    )];
    if critical > 0 {
        parts.push(format!("{} critical anomaly(ies).", critical));
    }
    if warnings > 0 {
        parts.push(format!("{} warning(s).", warnings));
    }
    parts.push(format!(
        "Latest: {} on {} (value: {:?}, expected: {:?}).",
        latest.direction, latest.date, latest.value, latest.expected_value
    ));

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anomaly_spi::{DetectorKind, Direction};
    use chrono::NaiveDate;

    fn record(day: u32, severity: Severity, direction: Direction) -> AnomalyRecord {
        AnomalyRecord {
            date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
            value: 50.0,
            expected_value: 15.7143,
            deviation: 2.45,
            deviation_percent: 218.2,
            severity,
            direction,
            method: DetectorKind::ZScore,
            detected_by: vec![DetectorKind::ZScore],
        }
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(
            summarize(7, "cpc", &[]),
            "Campaign 7: cpc is within normal range."
        );
    }

    #[test]
    fn test_summary_counts_and_latest() {
        let anomalies = vec![
            record(1, Severity::Critical, Direction::Drop),
            record(4, Severity::Warning, Direction::Spike),
        ];
        assert_eq!(
            summarize(12, "roas", &anomalies),
            "Campaign 12: 2 anomaly(ies) detected in roas. 1 critical anomaly(ies). \
             1 warning(s). Latest: spike on 2024-02-04 (value: 50.0, expected: 15.7143)."
        );
    }

    #[test]
    fn test_summary_omits_zero_counts() {
        let anomalies = vec![record(3, Severity::Warning, Direction::TrendDecreasing)];
        let summary = summarize(1, "ctr", &anomalies);
        assert!(!summary.contains("critical"));
        assert!(summary.contains("Latest: trend_decreasing on 2024-02-03"));
    }

    #[test]
    fn test_insufficient_summary() {
        assert_eq!(
            insufficient_data_summary(5),
            "Insufficient data for anomaly detection (minimum 5 data points required)."
        );
    }
}
