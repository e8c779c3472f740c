//! Isolation forest outlier scoring.
//!
//! Points that are isolated by few random splits score close to 1; points
//! inside dense regions score close to 0.5 or below. The decision threshold
//! sits at the contamination percentile of the training scores.

use anomaly_api::IsolationForestConfig;
use anomaly_spi::{
    AnomalyError, AnomalyRecord, CandidateDetector, DetectionInput, DetectorKind, Result, Severity,
};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use series_core::percentile;

use crate::detectors::point_record;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Average path length of an unsuccessful BST search over `n` points.
fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn build(points: &[f64], depth: usize, height_limit: usize, rng: &mut StdRng) -> Self {
        if depth >= height_limit || points.len() <= 1 {
            return Node::Leaf { size: points.len() };
        }

        let min = points.iter().copied().fold(f64::INFINITY, f64::min);
        let max = points.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max <= min {
            return Node::Leaf { size: points.len() };
        }

        let threshold = rng.gen_range(min..max);
        let (left, right): (Vec<f64>, Vec<f64>) =
            points.iter().copied().partition(|&x| x < threshold);

        Node::Split {
            threshold,
            left: Box::new(Node::build(&left, depth + 1, height_limit, rng)),
            right: Box::new(Node::build(&right, depth + 1, height_limit, rng)),
        }
    }

    fn path_length(&self, x: f64, depth: usize) -> f64 {
        match self {
            Node::Leaf { size } => depth as f64 + average_path_length(*size),
            Node::Split {
                threshold,
                left,
                right,
            } => {
                if x < *threshold {
                    left.path_length(x, depth + 1)
                } else {
                    right.path_length(x, depth + 1)
                }
            }
        }
    }
}

/// A fitted forest over one-dimensional values.
#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<Node>,
    sample_size: usize,
}

impl IsolationForest {
    /// Fit a forest to `values`.
    pub fn fit(values: &[f64], config: &IsolationForestConfig) -> Result<Self> {
        if values.len() < 2 {
            return Err(AnomalyError::InsufficientData {
                required: 2,
                got: values.len(),
            });
        }
        if config.n_trees == 0 {
            return Err(AnomalyError::InvalidParameter {
                name: "n_trees".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if config.max_samples < 2 {
            return Err(AnomalyError::InvalidParameter {
                name: "max_samples".to_string(),
                reason: "must be at least 2".to_string(),
            });
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(AnomalyError::DetectionError(format!(
                "cannot fit isolation forest on non-finite value {}",
                bad
            )));
        }

        let sample_size = config.max_samples.min(values.len());
        let height_limit = (sample_size as f64).log2().ceil() as usize;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let trees = (0..config.n_trees)
            .map(|_| {
                let subsample: Vec<f64> = sample(&mut rng, values.len(), sample_size)
                    .into_iter()
                    .map(|i| values[i])
                    .collect();
                Node::build(&subsample, 0, height_limit, &mut rng)
            })
            .collect();

        Ok(Self { trees, sample_size })
    }

    /// Anomaly score in (0, 1]; higher means more isolated.
    pub fn anomaly_scores(&self, values: &[f64]) -> Vec<f64> {
        let normalizer = average_path_length(self.sample_size);
        values
            .iter()
            .map(|&x| {
                let mean_path = self
                    .trees
                    .iter()
                    .map(|tree| tree.path_length(x, 0))
                    .sum::<f64>()
                    / self.trees.len() as f64;
                if normalizer > 0.0 {
                    2f64.powf(-mean_path / normalizer)
                } else {
                    0.5
                }
            })
            .collect()
    }

    /// Signed decision scores; negative values are outliers.
    ///
    /// The threshold is placed at the `contamination` percentile of the
    /// negated anomaly scores of `values`.
    pub fn decision_function(&self, values: &[f64], contamination: f64) -> Vec<f64> {
        let normality: Vec<f64> = self.anomaly_scores(values).iter().map(|s| -s).collect();
        let offset = percentile(&normality, contamination * 100.0);
        normality.iter().map(|s| s - offset).collect()
    }
}

/// Candidate detector backed by [`IsolationForest`].
///
/// Flagged points are always warnings; deviation is the absolute decision score.
#[derive(Debug, Clone, Default)]
pub struct IsolationForestDetector {
    config: IsolationForestConfig,
}

impl IsolationForestDetector {
    pub fn new(config: IsolationForestConfig) -> Self {
        Self { config }
    }
}

impl CandidateDetector for IsolationForestDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::IsolationForest
    }

    fn min_points(&self) -> usize {
        self.config.min_points
    }

    fn detect(&self, input: &DetectionInput<'_>, _sensitivity: f64) -> Result<Vec<AnomalyRecord>> {
        let forest = IsolationForest::fit(input.values, &self.config)?;
        let contamination = IsolationForestConfig::contamination(input.len());
        let decisions = forest.decision_function(input.values, contamination);

        Ok(input
            .dates
            .iter()
            .zip(input.values)
            .zip(decisions)
            .filter(|(_, decision)| *decision < 0.0)
            .map(|((&date, &value), decision)| {
                point_record(
                    date,
                    value,
                    input.mean,
                    decision.abs(),
                    Severity::Warning,
                    self.kind(),
                )
            })
            .collect())
    }
}
