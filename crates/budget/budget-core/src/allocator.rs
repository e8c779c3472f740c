//! Efficiency-proportional budget allocation.

use std::collections::BTreeSet;

use budget_api::AllocatorConfig;
use budget_spi::{
    BudgetError, BudgetOptimization, BudgetOptimizer, BudgetRecommendation, CampaignPerformance,
    ExpectedImprovement, OptimizationGoal, Result,
};
use series_core::round_to;

/// Efficiency of a campaign under `goal`; never negative.
///
/// Unrecognized goals score every campaign zero.
pub fn efficiency_score(campaign: &CampaignPerformance, goal: &OptimizationGoal) -> f64 {
    match goal {
        OptimizationGoal::Roas => campaign.roas.max(0.0),
        OptimizationGoal::Cpa => {
            if campaign.cpa > 0.0 {
                (1.0 / campaign.cpa).max(0.0)
            } else {
                0.0
            }
        }
        OptimizationGoal::Conversions => {
            if campaign.spend > 0.0 {
                campaign.conversions / campaign.spend
            } else {
                0.0
            }
        }
        OptimizationGoal::Other(_) => 0.0,
    }
}

/// Format as dollars with thousands separators, e.g. `$12,500.00`.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("${}{}.{}", sign, grouped, cents)
}

struct Scored<'a> {
    campaign: &'a CampaignPerformance,
    score: f64,
}

/// Splits a total budget in proportion to campaign efficiency.
#[derive(Debug, Clone, Default)]
pub struct BudgetAllocator {
    config: AllocatorConfig,
}

impl BudgetAllocator {
    pub fn new(config: AllocatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    fn reason(&self, campaign: &CampaignPerformance, goal: &OptimizationGoal, change: f64) -> String {
        let value = campaign
            .metric(goal)
            .map(|v| format!("{:?}", v))
            .unwrap_or_else(|| "N/A".to_string());
        let label = goal.label();

        if change.abs() < self.config.maintain_threshold_percent {
            format!("Maintain current budget. {} is at {}.", label, value)
        } else if change > 0.0 {
            format!(
                "Increase budget by {:.1}%. Strong {} performance ({}) on {}.",
                change.abs(),
                label,
                value,
                campaign.platform
            )
        } else {
            format!(
                "Decrease budget by {:.1}%. Below-average {} ({}) on {}.",
                change.abs(),
                label,
                value,
                campaign.platform
            )
        }
    }

    fn summary(&self, campaign_count: usize, total_budget: f64, recs: &[BudgetRecommendation]) -> String {
        let threshold = self.config.maintain_threshold_percent;
        let mut parts = vec![format!(
            "Budget optimization for {} campaigns ({} total).",
            campaign_count,
            format_currency(total_budget)
        )];

        let increases: Vec<&BudgetRecommendation> =
            recs.iter().filter(|r| r.change_percent > threshold).collect();
        let decreases: Vec<&BudgetRecommendation> =
            recs.iter().filter(|r| r.change_percent < -threshold).collect();

        for (verb, group) in [("Increase", increases), ("Decrease", decreases)] {
            if group.is_empty() {
                continue;
            }
            let platforms: BTreeSet<&str> = group.iter().map(|r| r.platform.as_str()).collect();
            parts.push(format!(
                "{} budget for {} campaign(s) on {}.",
                verb,
                group.len(),
                platforms.into_iter().collect::<Vec<_>>().join(", ")
            ));
        }

        parts.join(" ")
    }
}

/// Weighted mean, 0 when the weights sum to 0.
fn weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    let total_weight: f64 = weights.iter().sum();
    if total_weight == 0.0 {
        return 0.0;
    }
    values.iter().zip(weights).map(|(v, w)| v * w).sum::<f64>() / total_weight
}

impl BudgetOptimizer for BudgetAllocator {
    fn optimize(
        &self,
        organization_id: i64,
        total_budget: f64,
        campaigns: &[CampaignPerformance],
        goal: &OptimizationGoal,
    ) -> Result<BudgetOptimization> {
        if !total_budget.is_finite() || total_budget < 0.0 {
            return Err(BudgetError::InvalidParameter {
                name: "total_budget".to_string(),
                reason: format!("must be a non-negative number, got {}", total_budget),
            });
        }
        for campaign in campaigns {
            campaign.validate()?;
        }

        if campaigns.is_empty() {
            return Ok(BudgetOptimization::empty(organization_id, total_budget));
        }
        if !goal.is_known() {
            tracing::warn!(goal = %goal, "unrecognized optimization goal, all campaigns score zero");
        }

        let mut scored: Vec<Scored<'_>> = campaigns
            .iter()
            .map(|campaign| Scored {
                campaign,
                score: efficiency_score(campaign, goal),
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        let score_sum: f64 = scored.iter().map(|s| s.score).sum();
        let denominator = if score_sum == 0.0 { 1.0 } else { score_sum };

        let recommendations: Vec<BudgetRecommendation> = scored
            .iter()
            .map(|s| {
                let c = s.campaign;
                let recommended = round_to(total_budget * s.score / denominator, 2);
                let change = if c.current_budget > 0.0 {
                    (recommended - c.current_budget) / c.current_budget * 100.0
                } else {
                    0.0
                };
                BudgetRecommendation {
                    campaign_id: c.campaign_id,
                    platform: c.platform.clone(),
                    current_budget: c.current_budget,
                    recommended_budget: recommended,
                    change_percent: round_to(change, 1),
                    reason: self.reason(c, goal, change),
                }
            })
            .collect();

        let metrics: Vec<f64> = scored
            .iter()
            .map(|s| s.campaign.metric(goal).unwrap_or(0.0))
            .collect();
        let budgets: Vec<f64> = scored.iter().map(|s| s.campaign.current_budget).collect();
        let scores: Vec<f64> = scored.iter().map(|s| s.score).collect();
        let current = weighted_mean(&metrics, &budgets);
        let expected = weighted_mean(&metrics, &scores);
        let improvement = if current > 0.0 {
            (expected - current) / current * 100.0
        } else {
            0.0
        };

        tracing::debug!(
            organization_id,
            campaigns = campaigns.len(),
            goal = %goal,
            "budget allocated"
        );

        Ok(BudgetOptimization {
            organization_id,
            total_budget,
            summary: self.summary(campaigns.len(), total_budget, &recommendations),
            recommendations,
            expected_improvement: Some(ExpectedImprovement {
                metric: goal.to_string(),
                current_weighted_value: round_to(current, 2),
                expected_weighted_value: round_to(expected, 2),
                improvement_percent: round_to(improvement, 1),
            }),
        })
    }
}
