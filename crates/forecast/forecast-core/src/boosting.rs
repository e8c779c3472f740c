//! Gradient-boosted regression trees over lag windows.
//!
//! Squared-error boosting: every round fits a shallow tree to the current
//! residuals and adds a shrunken copy of it to the ensemble.

use forecast_api::BoostingConfig;
use forecast_spi::{ForecastError, ForecastStrategy, ModelKind, Result};
use series_spi::MetricSeries;

#[derive(Debug, Clone)]
enum Node {
    Leaf(f64),
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn predict(&self, row: &[f64]) -> f64 {
        match self {
            Node::Leaf(value) => *value,
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if row[*feature] < *threshold {
                    left.predict(row)
                } else {
                    right.predict(row)
                }
            }
        }
    }
}

/// Best split found for one node.
struct Split {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// Least-squares regression tree grown greedily to a fixed depth.
#[derive(Debug, Clone)]
pub struct RegressionTree {
    root: Node,
}

impl RegressionTree {
    /// Fit on rows `x` with targets `y`. `x` and `y` must have equal length.
    pub fn fit(x: &[Vec<f64>], y: &[f64], max_depth: usize) -> Self {
        let indices: Vec<usize> = (0..y.len()).collect();
        Self {
            root: build(x, y, &indices, 0, max_depth),
        }
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        self.root.predict(row)
    }
}

fn leaf_value(y: &[f64], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| y[i]).sum::<f64>() / indices.len() as f64
}

fn build(x: &[Vec<f64>], y: &[f64], indices: &[usize], depth: usize, max_depth: usize) -> Node {
    if depth >= max_depth || indices.len() < 2 {
        return Node::Leaf(leaf_value(y, indices));
    }

    let Some(split) = best_split(x, y, indices) else {
        return Node::Leaf(leaf_value(y, indices));
    };

    let (left, right): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| x[i][split.feature] < split.threshold);

    Node::Split {
        feature: split.feature,
        threshold: split.threshold,
        left: Box::new(build(x, y, &left, depth + 1, max_depth)),
        right: Box::new(build(x, y, &right, depth + 1, max_depth)),
    }
}

/// Exhaustive search over midpoints between distinct feature values.
///
/// Gain is the reduction in squared error; only strictly positive gains
/// count, and the first best split found wins ties.
fn best_split(x: &[Vec<f64>], y: &[f64], indices: &[usize]) -> Option<Split> {
    let n = indices.len() as f64;
    let total: f64 = indices.iter().map(|&i| y[i]).sum();
    let parent_score = total * total / n;
    let n_features = x.get(indices[0]).map_or(0, Vec::len);

    let mut best: Option<Split> = None;
    for feature in 0..n_features {
        let mut order = indices.to_vec();
        order.sort_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));

        let mut left_sum = 0.0;
        for pos in 0..order.len() - 1 {
            left_sum += y[order[pos]];
            let here = x[order[pos]][feature];
            let next = x[order[pos + 1]][feature];
            if next <= here {
                continue;
            }

            let left_n = (pos + 1) as f64;
            let right_n = n - left_n;
            let right_sum = total - left_sum;
            let gain =
                left_sum * left_sum / left_n + right_sum * right_sum / right_n - parent_score;

            if gain > 1e-12 && best.as_ref().map_or(true, |b| gain > b.gain) {
                best = Some(Split {
                    feature,
                    threshold: (here + next) / 2.0,
                    gain,
                });
            }
        }
    }
    best
}

/// Additive ensemble of regression trees.
#[derive(Debug, Clone)]
pub struct GradientBoostedTrees {
    base: f64,
    learning_rate: f64,
    trees: Vec<RegressionTree>,
}

impl GradientBoostedTrees {
    pub fn fit(x: &[Vec<f64>], y: &[f64], config: &BoostingConfig) -> Result<Self> {
        if x.is_empty() || x.len() != y.len() {
            return Err(ForecastError::InsufficientData {
                required: 1,
                actual: x.len().min(y.len()),
            });
        }

        let base = y.iter().sum::<f64>() / y.len() as f64;
        let mut fitted = vec![base; y.len()];
        let mut trees = Vec::with_capacity(config.n_estimators);

        for _ in 0..config.n_estimators {
            let residuals: Vec<f64> = y.iter().zip(&fitted).map(|(t, f)| t - f).collect();
            let tree = RegressionTree::fit(x, &residuals, config.max_depth);
            for (row, f) in x.iter().zip(fitted.iter_mut()) {
                *f += config.learning_rate * tree.predict(row);
            }
            trees.push(tree);
        }

        if !base.is_finite() || fitted.iter().any(|f| !f.is_finite()) {
            return Err(ForecastError::NumericalError(
                "boosting diverged to non-finite values".to_string(),
            ));
        }

        Ok(Self {
            base,
            learning_rate: config.learning_rate,
            trees,
        })
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        self.base
            + self.learning_rate * self.trees.iter().map(|t| t.predict(row)).sum::<f64>()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

/// Gradient-boosted lag regression forecaster
///
/// Each training row is the `lag` values preceding a target. Forecasting is
/// recursive: the raw prediction is fed back as the newest lag, while the
/// emitted value is floored at zero.
#[derive(Debug, Clone, Default)]
pub struct GradientBoostingForecaster {
    config: BoostingConfig,
}

impl GradientBoostingForecaster {
    pub fn new(config: BoostingConfig) -> Self {
        Self { config }
    }

    /// Effective lag for a series of `n` points.
    pub fn lag_for(&self, n: usize) -> usize {
        self.config.max_lag.min(n.saturating_sub(1))
    }
}

impl ForecastStrategy for GradientBoostingForecaster {
    fn kind(&self) -> ModelKind {
        ModelKind::GradientBoosting
    }

    fn forecast(&self, series: &MetricSeries, horizon: usize) -> Result<Vec<f64>> {
        let values = series.values();
        let lag = self.lag_for(values.len());
        if lag == 0 {
            return Err(ForecastError::InsufficientData {
                required: 2,
                actual: values.len(),
            });
        }

        let x: Vec<Vec<f64>> = values.windows(lag + 1).map(|w| w[..lag].to_vec()).collect();
        let y: Vec<f64> = values[lag..].to_vec();
        let model = GradientBoostedTrees::fit(&x, &y, &self.config)?;

        let mut window: Vec<f64> = values[values.len() - lag..].to_vec();
        let mut predictions = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            let raw = model.predict(&window[window.len() - lag..]);
            if !raw.is_finite() {
                return Err(ForecastError::NumericalError(
                    "non-finite boosted prediction".to_string(),
                ));
            }
            predictions.push(raw.max(0.0));
            window.push(raw);
        }
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    #[test]
    fn test_tree_separates_two_levels() {
        let x: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..10).map(|i| if i < 5 { 1.0 } else { 9.0 }).collect();

        let tree = RegressionTree::fit(&x, &y, 1);
        assert_eq!(tree.predict(&[2.0]), 1.0);
        assert_eq!(tree.predict(&[7.0]), 9.0);
    }

    #[test]
    fn test_tree_on_constant_target_is_a_leaf() {
        let x: Vec<Vec<f64>> = (0..6).map(|i| vec![i as f64, 1.0]).collect();
        let y = vec![4.0; 6];
        let tree = RegressionTree::fit(&x, &y, 3);
        assert_eq!(tree.predict(&[100.0, 1.0]), 4.0);
    }

    #[test]
    fn test_boosting_reduces_training_error() {
        let x: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..20).map(|i| (i as f64 * 0.7).sin() * 10.0).collect();

        let model = GradientBoostedTrees::fit(&x, &y, &BoostingConfig::default()).unwrap();
        assert_eq!(model.n_trees(), 100);

        let mean = y.iter().sum::<f64>() / y.len() as f64;
        let baseline: f64 = y.iter().map(|t| (t - mean).powi(2)).sum();
        let fitted: f64 = x
            .iter()
            .zip(&y)
            .map(|(row, t)| (t - model.predict(row)).powi(2))
            .sum();
        assert!(fitted < baseline * 0.1);
    }

    #[test]
    fn test_single_training_row_predicts_its_target() {
        let series = MetricSeries::daily(start(), &[100.0, 110.0, 105.0]);
        let forecaster = GradientBoostingForecaster::default();
        assert_eq!(forecaster.lag_for(3), 2);

        let forecast = forecaster.forecast(&series, 2).unwrap();
        assert_eq!(forecast.len(), 2);
        for value in forecast {
            assert!((value - 105.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_predictions_are_non_negative() {
        let values: Vec<f64> = (0..20).map(|i| 40.0 - 2.0 * i as f64).collect();
        let series = MetricSeries::daily(start(), &values);
        let forecast = GradientBoostingForecaster::default()
            .forecast(&series, 10)
            .unwrap();
        assert_eq!(forecast.len(), 10);
        assert!(forecast.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn test_single_point_is_insufficient() {
        let series = MetricSeries::daily(start(), &[5.0]);
        assert!(GradientBoostingForecaster::default()
            .forecast(&series, 1)
            .is_err());
    }
}
