//! Diminishing-returns budget projection.
//!
//! Revenue is modelled as `a * ln(spend) + b`. The marginal return at spend
//! `s` is `a / s`, so the spend where it equals the target ROAS is
//! `a / target_roas`.

use budget_api::ReturnsConfig;
use budget_spi::{
    BudgetError, BudgetForecast, BudgetForecastOutcome, BudgetProjector, BudgetRange,
    BudgetScenario, ForecastConfidence, Result,
};
use series_core::{mean, round_to};
use series_spi::MetricSeries;

/// Least-squares fit of revenue against log spend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnsCurve {
    pub slope: f64,
    pub intercept: f64,
}

impl ReturnsCurve {
    /// Fit over paired points. Spends below 1 are treated as 1.
    ///
    /// Returns `None` with fewer than two pairs, mismatched lengths, or when
    /// every log spend is the same.
    pub fn fit(spends: &[f64], revenues: &[f64]) -> Option<Self> {
        if spends.len() < 2 || spends.len() != revenues.len() {
            return None;
        }

        let x: Vec<f64> = spends.iter().map(|s| s.max(1.0).ln()).collect();
        let x_mean = mean(&x);
        let y_mean = mean(revenues);

        let sxx: f64 = x.iter().map(|xi| (xi - x_mean).powi(2)).sum();
        if sxx < f64::EPSILON {
            return None;
        }
        let sxy: f64 = x
            .iter()
            .zip(revenues)
            .map(|(xi, yi)| (xi - x_mean) * (yi - y_mean))
            .sum();

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;
        if slope.is_finite() && intercept.is_finite() {
            Some(Self { slope, intercept })
        } else {
            None
        }
    }

    pub fn revenue_at(&self, spend: f64) -> f64 {
        self.slope * spend.max(1.0).ln() + self.intercept
    }
}

/// Budget projector over spend and revenue history.
#[derive(Debug, Clone, Default)]
pub struct BudgetReturnsModel {
    config: ReturnsConfig,
}

impl BudgetReturnsModel {
    pub fn new(config: ReturnsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReturnsConfig {
        &self.config
    }

    fn trailing<'a>(&self, values: &'a [f64]) -> &'a [f64] {
        &values[values.len().saturating_sub(self.config.trailing_window)..]
    }

    fn scenarios(
        &self,
        avg_spend: f64,
        curve: Option<ReturnsCurve>,
        current_roas: f64,
    ) -> Vec<BudgetScenario> {
        self.config
            .multipliers
            .iter()
            .map(|&multiplier| {
                let spend = avg_spend * multiplier;
                let revenue = curve
                    .map(|c| c.revenue_at(spend))
                    .unwrap_or(spend * current_roas)
                    .max(0.0);
                BudgetScenario {
                    daily_budget: round_to(spend, 2),
                    projected_revenue: round_to(revenue, 2),
                    projected_roas: round_to(revenue / spend.max(1.0), 2),
                    budget_change_percent: round_to((multiplier - 1.0) * 100.0, 1),
                }
            })
            .collect()
    }
}

impl BudgetProjector for BudgetReturnsModel {
    fn forecast_budget(
        &self,
        spend: &MetricSeries,
        revenue: &MetricSeries,
        target_roas: f64,
        range: &BudgetRange,
    ) -> Result<BudgetForecastOutcome> {
        // a target at or below zero falls back to the average spend
        if !target_roas.is_finite() {
            return Err(BudgetError::InvalidParameter {
                name: "target_roas".to_string(),
                reason: format!("must be a finite number, got {}", target_roas),
            });
        }
        range.validate()?;

        let spends = spend.values();
        if spends.len() < self.config.min_points {
            return Ok(BudgetForecastOutcome::insufficient_data(self.config.min_points));
        }

        let mut revenues = revenue.values();
        revenues.truncate(spends.len());

        let current_roas = revenues.iter().sum::<f64>() / spends.iter().sum::<f64>().max(1.0);
        let avg_spend = mean(self.trailing(&spends));
        let avg_revenue = mean(self.trailing(&revenues));

        let min_budget = range.min.unwrap_or(avg_spend * self.config.default_min_factor);
        let max_budget = range.max.unwrap_or(avg_spend * self.config.default_max_factor);

        let curve = ReturnsCurve::fit(&spends, &revenues);
        let optimal = match curve {
            Some(c) if target_roas > 0.0 => c.slope / target_roas,
            _ => avg_spend,
        };
        // lower bound wins if the range is inverted
        let optimal = optimal.min(max_budget).max(min_budget);

        tracing::debug!(
            points = spends.len(),
            fitted = curve.is_some(),
            optimal,
            "budget projection computed"
        );

        let confidence = if spends.len() >= self.config.medium_confidence_points {
            ForecastConfidence::Medium
        } else {
            ForecastConfidence::Low
        };

        Ok(BudgetForecastOutcome::Forecast(BudgetForecast {
            current_daily_spend: round_to(avg_spend, 2),
            current_daily_revenue: round_to(avg_revenue, 2),
            current_roas: round_to(current_roas, 2),
            target_roas,
            recommended_daily_budget: round_to(optimal, 2),
            projected_daily_revenue: round_to(optimal * target_roas.min(current_roas * 1.1), 2),
            budget_change_percent: round_to((optimal - avg_spend) / avg_spend.max(1.0) * 100.0, 1),
            scenarios: self.scenarios(avg_spend, curve, current_roas),
            confidence,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn series(values: &[f64]) -> MetricSeries {
        MetricSeries::daily(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), values)
    }

    fn log_curve(spends: &[f64], a: f64, b: f64) -> Vec<f64> {
        spends.iter().map(|s| a * s.ln() + b).collect()
    }

    fn forecast(outcome: BudgetForecastOutcome) -> BudgetForecast {
        match outcome {
            BudgetForecastOutcome::Forecast(f) => f,
            BudgetForecastOutcome::InsufficientData(d) => panic!("unexpected {:?}", d),
        }
    }

    #[test]
    fn test_curve_fit_recovers_coefficients() {
        let spends = [10.0, 20.0, 40.0, 80.0, 160.0];
        let curve = ReturnsCurve::fit(&spends, &log_curve(&spends, 120.0, -30.0)).unwrap();
        assert!((curve.slope - 120.0).abs() < 1e-9);
        assert!((curve.intercept + 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_curve_fit_failures() {
        assert!(ReturnsCurve::fit(&[10.0], &[5.0]).is_none());
        assert!(ReturnsCurve::fit(&[10.0, 20.0], &[5.0]).is_none());
        assert!(ReturnsCurve::fit(&[50.0; 8], &[100.0; 8]).is_none());
        // everything at or below 1 collapses to ln(1)
        assert!(ReturnsCurve::fit(&[0.2, 0.5, 1.0], &[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_short_history_is_labelled() {
        let outcome = BudgetReturnsModel::default()
            .forecast_budget(
                &series(&[1.0; 6]),
                &series(&[2.0; 6]),
                3.0,
                &BudgetRange::default(),
            )
            .unwrap();
        assert_eq!(outcome, BudgetForecastOutcome::insufficient_data(7));
    }

    #[test]
    fn test_optimal_spend_where_marginal_return_meets_target() {
        let spends = [50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 120.0, 130.0, 140.0];
        let revenues = log_curve(&spends, 300.0, 50.0);

        let result = forecast(
            BudgetReturnsModel::default()
                .forecast_budget(&series(&spends), &series(&revenues), 3.0, &BudgetRange::default())
                .unwrap(),
        );

        assert_eq!(result.current_daily_spend, 110.0);
        assert_eq!(result.recommended_daily_budget, 100.0);
        assert_eq!(result.budget_change_percent, -9.1);
        assert_eq!(result.confidence, ForecastConfidence::Low);
        assert_eq!(result.scenarios.len(), 6);
        assert_eq!(result.scenarios[0].daily_budget, 55.0);
        assert_eq!(result.scenarios[0].budget_change_percent, -50.0);
        assert_eq!(result.scenarios[5].budget_change_percent, 100.0);
    }

    #[test]
    fn test_explicit_range_clamps() {
        let spends = [50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 120.0, 130.0, 140.0];
        let revenues = log_curve(&spends, 300.0, 50.0);

        let result = forecast(
            BudgetReturnsModel::default()
                .forecast_budget(
                    &series(&spends),
                    &series(&revenues),
                    3.0,
                    &BudgetRange::new(None, Some(80.0)),
                )
                .unwrap(),
        );
        assert_eq!(result.recommended_daily_budget, 80.0);
    }

    #[test]
    fn test_flat_spend_falls_back_to_average_and_current_roas() {
        let spends = [100.0; 10];
        let revenues = [250.0; 10];

        let result = forecast(
            BudgetReturnsModel::default()
                .forecast_budget(&series(&spends), &series(&revenues), 4.0, &BudgetRange::default())
                .unwrap(),
        );

        assert_eq!(result.current_roas, 2.5);
        assert_eq!(result.recommended_daily_budget, 100.0);
        assert_eq!(result.budget_change_percent, 0.0);
        // no curve: revenue proportional to spend at current ROAS
        assert_eq!(result.scenarios[0].projected_revenue, 125.0);
        assert_eq!(result.scenarios[5].projected_revenue, 500.0);
        assert_eq!(result.scenarios[5].projected_roas, 2.5);
        // min(target 4.0, 1.1 x 2.5)
        assert_eq!(result.projected_daily_revenue, 275.0);
    }

    #[test]
    fn test_shorter_revenue_history_skips_the_curve() {
        let spends: Vec<f64> = (1..=10).map(|i| 10.0 * i as f64).collect();
        let revenues: Vec<f64> = spends[..8].iter().map(|s| s * 2.0).collect();

        let result = forecast(
            BudgetReturnsModel::default()
                .forecast_budget(&series(&spends), &series(&revenues), 2.0, &BudgetRange::default())
                .unwrap(),
        );
        // avg spend 70: min 35, max 140, no curve so optimal = average
        assert_eq!(result.recommended_daily_budget, 70.0);
    }

    #[test]
    fn test_month_of_history_is_medium_confidence() {
        let spends: Vec<f64> = (0..30).map(|i| 100.0 + (i % 5) as f64 * 10.0).collect();
        let revenues = log_curve(&spends, 200.0, 10.0);
        let result = forecast(
            BudgetReturnsModel::default()
                .forecast_budget(&series(&spends), &series(&revenues), 2.0, &BudgetRange::default())
                .unwrap(),
        );
        assert_eq!(result.confidence, ForecastConfidence::Medium);
    }

    #[test]
    fn test_rejects_non_finite_target() {
        let result = BudgetReturnsModel::default().forecast_budget(
            &series(&[1.0; 7]),
            &series(&[1.0; 7]),
            f64::NAN,
            &BudgetRange::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_non_positive_target_falls_back_to_average_spend() {
        let spends = [50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 120.0, 130.0, 140.0];
        let revenues = log_curve(&spends, 300.0, 50.0);

        for target in [0.0, -1.0] {
            let result = forecast(
                BudgetReturnsModel::default()
                    .forecast_budget(&series(&spends), &series(&revenues), target, &BudgetRange::default())
                    .unwrap(),
            );

            // trailing average 110 sits inside [55, 220]
            assert_eq!(result.recommended_daily_budget, 110.0);
            assert_eq!(result.budget_change_percent, 0.0);
            assert_eq!(result.target_roas, target);
            assert_eq!(result.scenarios.len(), 6);
            assert_eq!(
                result.scenarios[0].projected_revenue,
                round_to(300.0 * 55.0f64.ln() + 50.0, 2)
            );
        }
    }

    proptest! {
        #[test]
        fn prop_scenarios_monotonic_with_positive_slope(
            spends in prop::collection::vec(5.0f64..500.0, 7..40),
            noise in prop::collection::vec(-5.0f64..5.0, 40),
        ) {
            let revenues: Vec<f64> = spends
                .iter()
                .zip(&noise)
                .map(|(s, e)| 80.0 * s.ln() + 20.0 + e)
                .collect();
            let model = BudgetReturnsModel::default();

            if let Some(curve) = ReturnsCurve::fit(&spends, &revenues) {
                prop_assume!(curve.slope > 0.0);
                let outcome = model
                    .forecast_budget(&series(&spends), &series(&revenues), 2.0, &BudgetRange::default())
                    .unwrap();
                let result = outcome.forecast().cloned().unwrap();
                for pair in result.scenarios.windows(2) {
                    prop_assert!(pair[1].projected_revenue >= pair[0].projected_revenue);
                }
            }
        }
    }
}
