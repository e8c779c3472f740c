//! Statistical detector implementations.

use anomaly_spi::{
    AnomalyRecord, CandidateDetector, DetectionInput, DetectorKind, Direction, Result, Severity,
};
use chrono::NaiveDate;
use series_core::{mean, population_std, round_to};

/// Build a point record scored against `expected`.
pub(crate) fn point_record(
    date: NaiveDate,
    value: f64,
    expected: f64,
    deviation: f64,
    severity: Severity,
    kind: DetectorKind,
) -> AnomalyRecord {
    AnomalyRecord {
        date,
        value: round_to(value, 4),
        expected_value: round_to(expected, 4),
        deviation: round_to(deviation, 2),
        deviation_percent: round_to((value - expected) / expected.abs().max(1.0) * 100.0, 1),
        severity,
        direction: Direction::point(value, expected),
        method: kind,
        detected_by: vec![kind],
    }
}

// ============================================================================
// Z-Score Detector
// ============================================================================

/// Flags points far from the whole-series mean, in population standard deviations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZScoreDetector;

impl CandidateDetector for ZScoreDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::ZScore
    }

    fn min_points(&self) -> usize {
        1
    }

    fn detect(&self, input: &DetectionInput<'_>, sensitivity: f64) -> Result<Vec<AnomalyRecord>> {
        if input.std == 0.0 {
            return Ok(Vec::new());
        }
        Ok(input
            .dates
            .iter()
            .zip(input.values)
            .filter_map(|(&date, &value)| {
                let score = (value - input.mean).abs() / input.std;
                (score > sensitivity).then(|| {
                    point_record(
                        date,
                        value,
                        input.mean,
                        score,
                        Severity::from_score(score, sensitivity),
                        self.kind(),
                    )
                })
            })
            .collect())
    }
}

// ============================================================================
// Rolling Window Detector
// ============================================================================

/// Scores each point against the window of points immediately before it.
#[derive(Debug, Clone, Copy)]
pub struct RollingWindowDetector {
    max_window: usize,
    min_points: usize,
}

impl RollingWindowDetector {
    pub fn new(max_window: usize, min_points: usize) -> Self {
        Self {
            max_window,
            min_points,
        }
    }

    /// Window used for a series of `n` points: min(max_window, n / 2).
    pub fn window_size(&self, n: usize) -> usize {
        self.max_window.min(n / 2)
    }
}

impl Default for RollingWindowDetector {
    fn default() -> Self {
        Self::new(7, 7)
    }
}

impl CandidateDetector for RollingWindowDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::RollingWindow
    }

    fn min_points(&self) -> usize {
        self.min_points
    }

    fn detect(&self, input: &DetectionInput<'_>, sensitivity: f64) -> Result<Vec<AnomalyRecord>> {
        let window = self.window_size(input.len());
        if window == 0 {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for i in window..input.len() {
            let preceding = &input.values[i - window..i];
            let window_mean = mean(preceding);
            let window_std = population_std(preceding);
            if window_std == 0.0 {
                continue;
            }

            let value = input.values[i];
            let score = (value - window_mean).abs() / window_std;
            if score > sensitivity {
                records.push(point_record(
                    input.dates[i],
                    value,
                    window_mean,
                    score,
                    Severity::from_score(score, sensitivity),
                    self.kind(),
                ));
            }
        }
        Ok(records)
    }
}

// ============================================================================
// Trend Shift Detector
// ============================================================================

/// Compares the mean of the most recent points against everything before them.
///
/// Emits at most one record, dated at the last point.
#[derive(Debug, Clone, Copy)]
pub struct TrendShiftDetector {
    recent: usize,
    min_points: usize,
}

impl TrendShiftDetector {
    pub fn new(recent: usize, min_points: usize) -> Self {
        Self { recent, min_points }
    }
}

impl Default for TrendShiftDetector {
    fn default() -> Self {
        Self::new(3, 7)
    }
}

impl CandidateDetector for TrendShiftDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::TrendDetection
    }

    fn min_points(&self) -> usize {
        self.min_points.max(self.recent + 1)
    }

    fn detect(&self, input: &DetectionInput<'_>, sensitivity: f64) -> Result<Vec<AnomalyRecord>> {
        let n = input.len();
        let split = n.saturating_sub(self.recent);
        let (historical, recent) = input.values.split_at(split);
        let (Some(&last_date), false) = (input.dates.last(), historical.is_empty()) else {
            return Ok(Vec::new());
        };

        let recent_mean = mean(recent);
        let hist_mean = mean(historical);
        let hist_std = population_std(historical);
        if hist_std == 0.0 {
            return Ok(Vec::new());
        }

        let shift = (recent_mean - hist_mean).abs() / hist_std;
        if shift <= sensitivity {
            return Ok(Vec::new());
        }

        let pct_change = if hist_mean == 0.0 {
            0.0
        } else {
            (recent_mean - hist_mean) / hist_mean * 100.0
        };

        Ok(vec![AnomalyRecord {
            date: last_date,
            value: round_to(recent_mean, 4),
            expected_value: round_to(hist_mean, 4),
            deviation: round_to(shift, 2),
            deviation_percent: round_to(pct_change, 1),
            severity: Severity::Warning,
            direction: Direction::trend(recent_mean, hist_mean),
            method: self.kind(),
            detected_by: vec![self.kind()],
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn dates(n: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| start.checked_add_days(Days::new(i as u64)).unwrap())
            .collect()
    }

    fn input<'a>(dates: &'a [NaiveDate], values: &'a [f64]) -> DetectionInput<'a> {
        DetectionInput {
            dates,
            values,
            mean: mean(values),
            std: population_std(values),
        }
    }

    #[test]
    fn test_zscore_flags_spike() {
        let values = [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 50.0];
        let d = dates(values.len());
        let records = ZScoreDetector.detect(&input(&d, &values), 2.0).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.date, d[6]);
        assert_eq!(record.direction, Direction::Spike);
        assert_eq!(record.method, DetectorKind::ZScore);
        // mean 15.714, std 13.997 -> z = 2.449, not above 3.0
        assert_eq!(record.severity, Severity::Warning);
        assert!((record.deviation - 2.45).abs() < 1e-9);
        assert!((record.expected_value - 15.7143).abs() < 1e-9);
    }

    #[test]
    fn test_zscore_flags_drop_as_critical() {
        let mut values = vec![100.0; 30];
        values[20] = 0.0;
        let d = dates(values.len());
        let records = ZScoreDetector.detect(&input(&d, &values), 2.0).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].direction, Direction::Drop);
        assert_eq!(records[0].severity, Severity::Critical);
        assert!(records[0].deviation_percent < -90.0);
    }

    #[test]
    fn test_rolling_window_size() {
        let detector = RollingWindowDetector::default();
        assert_eq!(detector.window_size(7), 3);
        assert_eq!(detector.window_size(14), 7);
        assert_eq!(detector.window_size(100), 7);
    }

    #[test]
    fn test_rolling_uses_preceding_window() {
        let values = [10.0, 11.0, 10.0, 11.0, 10.0, 11.0, 10.0, 11.0, 30.0, 10.0];
        let d = dates(values.len());
        let records = RollingWindowDetector::default()
            .detect(&input(&d, &values), 2.0)
            .unwrap();

        assert!(records.iter().any(|r| r.date == d[8]));
        let spike = records.iter().find(|r| r.date == d[8]).unwrap();
        assert_eq!(spike.direction, Direction::Spike);
        assert_eq!(spike.severity, Severity::Critical);
        assert_eq!(spike.method, DetectorKind::RollingWindow);
    }

    #[test]
    fn test_rolling_skips_flat_windows() {
        let values = [5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 9.0];
        let d = dates(values.len());
        let records = RollingWindowDetector::default()
            .detect(&input(&d, &values), 2.0)
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_trend_shift_increasing() {
        let values = [10.0, 11.0, 10.0, 11.0, 10.0, 11.0, 20.0, 21.0, 22.0];
        let d = dates(values.len());
        let records = TrendShiftDetector::default()
            .detect(&input(&d, &values), 2.0)
            .unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.date, d[8]);
        assert_eq!(record.direction, Direction::TrendIncreasing);
        assert_eq!(record.severity, Severity::Warning);
        assert_eq!(record.value, 21.0);
        assert_eq!(record.expected_value, 10.5);
    }

    #[test]
    fn test_trend_shift_below_sensitivity() {
        let values = [10.0, 12.0, 10.0, 12.0, 10.0, 12.0, 11.0, 11.0, 11.0];
        let d = dates(values.len());
        let records = TrendShiftDetector::default()
            .detect(&input(&d, &values), 2.0)
            .unwrap();
        assert!(records.is_empty());
    }
}
