//! Core projection engine for monthly revenue simulation

use crate::inputs::ScenarioInputs;

use super::rows::{MonthRow, ProjectionResult};
use super::state::ProjectionState;

/// Default projection horizon in months
pub const DEFAULT_HORIZON_MONTHS: u32 = 60;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Number of months to project
    pub horizon_months: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_months: DEFAULT_HORIZON_MONTHS,
        }
    }
}

/// Main projection engine
///
/// Pure and stateless across invocations: projecting the same scenario twice
/// yields identical output.
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Simulate the configured horizon for one scenario
    pub fn project(&self, inputs: &ScenarioInputs) -> ProjectionResult {
        let mut result = ProjectionResult::new();
        let mut state = ProjectionState::new();

        // Acquisition volume is fixed once per run, not recomputed monthly
        let acquisition_volume = inputs.monthly_acquisition();

        for _month in 1..=self.config.horizon_months {
            state.advance_month();

            let row = self.calculate_month(inputs, acquisition_volume, &mut state);
            result.add_row(row);
        }

        result
    }

    /// Calculate one month of acquisition, churn, revenue, cost, and profit
    fn calculate_month(
        &self,
        inputs: &ScenarioInputs,
        acquisition_volume: u32,
        state: &mut ProjectionState,
    ) -> MonthRow {
        state.acquire(acquisition_volume);
        let churned = state.apply_churn(inputs.churn_rate);

        let base_revenue = blended_revenue(inputs, state.active_customers);

        // Zero in month 1 since there is no prior revenue yet
        let expansion = state.previous_month_revenue * inputs.expansion_rate / 100.0;
        let monthly_revenue = base_revenue + expansion;

        let acquisition_spend = acquisition_volume as f64 * inputs.cac;
        let operating_cost = state.active_customers as f64
            * (inputs.support_cost_per_user + inputs.infra_cost_per_user)
            + acquisition_spend;

        // Net revenue deducts acquisition spend only; profit deducts the full cost
        let net_revenue = monthly_revenue - acquisition_spend;
        let profit = monthly_revenue - operating_cost;

        state.cumulative_revenue += monthly_revenue;
        state.cumulative_net_revenue += net_revenue;
        state.cumulative_profit += profit;
        state.previous_month_revenue = monthly_revenue;

        MonthRow {
            month: state.month,
            total_revenue: round_currency(state.cumulative_revenue),
            total_customers: state.total_customers,
            active_customers: state.active_customers,
            monthly_revenue: round_currency(monthly_revenue),
            churned_customers: churned,
            net_revenue: round_currency(state.cumulative_net_revenue),
            expansion_revenue: round_currency(expansion),
            operating_cost: round_currency(operating_cost),
            cumulative_profit: round_currency(state.cumulative_profit),
        }
    }
}

/// Monthly base revenue for the active pool
///
/// With plans configured this is the probability-weighted blended price
/// applied to the whole pool; probabilities are normalized against their own
/// sum, and a zero sum degenerates to zero revenue. Without plans, the flat
/// per-customer price applies.
fn blended_revenue(inputs: &ScenarioInputs, active_customers: u32) -> f64 {
    let active = active_customers as f64;

    if inputs.plans.is_empty() {
        return active * inputs.avg_monthly_revenue;
    }

    let total_weight: f64 = inputs.plans.iter().map(|p| p.probability).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }

    inputs
        .plans
        .iter()
        .map(|p| p.price * (p.probability / total_weight) * active)
        .sum()
}

/// Round to the nearest whole currency unit; non-finite values collapse to 0
fn round_currency(value: f64) -> f64 {
    if value.is_finite() {
        value.round()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{AcquisitionMode, PricingPlan, ScenarioInputs};

    fn base_inputs() -> ScenarioInputs {
        ScenarioInputs {
            target_income: 10_000.0,
            avg_monthly_revenue: 50.0,
            plans: Vec::new(),
            churn_rate: 10.0,
            cac: 100.0,
            expansion_rate: 5.0,
            support_cost_per_user: 2.0,
            infra_cost_per_user: 3.0,
            acquisition: AcquisitionMode::Auto,
        }
    }

    fn engine(months: u32) -> ProjectionEngine {
        ProjectionEngine::new(ProjectionConfig {
            horizon_months: months,
        })
    }

    #[test]
    fn test_horizon_and_month_ordering() {
        let result = engine(60).project(&base_inputs());

        assert_eq!(result.rows.len(), 60);
        for (i, row) in result.rows.iter().enumerate() {
            assert_eq!(row.month, i as u32 + 1);
        }
    }

    #[test]
    fn test_month_one_worked_example() {
        // target 10000 / price 50 -> 200 acquired; churn 10% -> 20 lost
        let result = engine(1).project(&base_inputs());
        let row = &result.rows[0];

        assert_eq!(row.total_customers, 200);
        assert_eq!(row.churned_customers, 20);
        assert_eq!(row.active_customers, 180);
        assert_eq!(row.monthly_revenue, 9_000.0);
        assert_eq!(row.expansion_revenue, 0.0);
        assert_eq!(row.operating_cost, 20_900.0);
        assert_eq!(row.net_revenue, -11_000.0);
        assert_eq!(row.cumulative_profit, -11_900.0);
    }

    #[test]
    fn test_expansion_compounds_from_prior_month() {
        let result = engine(2).project(&base_inputs());

        assert_eq!(result.rows[0].expansion_revenue, 0.0);
        // Month 2 expansion = 5% of month 1 gross revenue
        assert_eq!(result.rows[1].expansion_revenue, 450.0);
    }

    #[test]
    fn test_flat_rate_revenue_matches_active_pool() {
        let mut inputs = base_inputs();
        inputs.expansion_rate = 0.0;

        let result = engine(24).project(&inputs);
        for row in &result.rows {
            assert_eq!(
                row.monthly_revenue,
                (row.active_customers as f64 * inputs.avg_monthly_revenue).round()
            );
        }
    }

    #[test]
    fn test_blended_plan_revenue() {
        let mut inputs = base_inputs();
        inputs.expansion_rate = 0.0;
        inputs.plans = vec![
            PricingPlan::new("Basic", 10.0, 60.0),
            PricingPlan::new("Pro", 50.0, 40.0),
        ];

        // Blended ARPU = 10 * 0.6 + 50 * 0.4 = 26
        let result = engine(12).project(&inputs);
        for row in &result.rows {
            assert_eq!(
                row.monthly_revenue,
                (row.active_customers as f64 * 26.0).round()
            );
        }
    }

    #[test]
    fn test_zero_probability_plans_yield_zero_revenue() {
        let mut inputs = base_inputs();
        inputs.plans = vec![
            PricingPlan::new("Basic", 10.0, 0.0),
            PricingPlan::new("Pro", 50.0, 0.0),
        ];

        let result = engine(6).project(&inputs);
        for row in &result.rows {
            assert_eq!(row.monthly_revenue, 0.0);
            // Customers are still acquired and costs still accrue
            assert!(row.total_customers > 0);
            assert!(row.operating_cost > 0.0);
        }
    }

    #[test]
    fn test_zero_price_auto_acquisition_produces_zeros() {
        let mut inputs = base_inputs();
        inputs.avg_monthly_revenue = 0.0;

        let result = engine(12).project(&inputs);
        for row in &result.rows {
            assert_eq!(row.total_customers, 0);
            assert_eq!(row.active_customers, 0);
            assert_eq!(row.monthly_revenue, 0.0);
            assert_eq!(row.total_revenue, 0.0);
            assert_eq!(row.operating_cost, 0.0);
        }
    }

    #[test]
    fn test_full_churn_never_goes_negative() {
        let mut inputs = base_inputs();
        inputs.churn_rate = 100.0;

        let result = engine(12).project(&inputs);
        for row in &result.rows {
            assert_eq!(row.active_customers, 0);
            assert_eq!(row.churned_customers, 200);
        }
    }

    #[test]
    fn test_fixed_acquisition_volume() {
        let mut inputs = base_inputs();
        inputs.acquisition = AcquisitionMode::Fixed(10);
        inputs.churn_rate = 0.0;

        let result = engine(6).project(&inputs);
        for row in &result.rows {
            assert_eq!(row.total_customers, 10 * row.month);
            assert_eq!(row.active_customers, 10 * row.month);
        }
    }

    #[test]
    fn test_projection_is_deterministic() {
        let inputs = base_inputs();
        let first = engine(60).project(&inputs);
        let second = engine(60).project(&inputs);

        assert_eq!(first.rows, second.rows);
    }

    #[test]
    fn test_cumulative_revenue_is_non_decreasing() {
        let result = engine(60).project(&base_inputs());

        let mut prior = 0.0;
        for row in &result.rows {
            assert!(row.total_revenue >= prior);
            prior = row.total_revenue;
        }
    }

    #[test]
    fn test_summary_totals() {
        let result = engine(60).project(&base_inputs());
        let summary = result.summary();

        assert_eq!(summary.total_months, 60);
        assert_eq!(summary.total_customers_acquired, 200 * 60);
        assert_eq!(summary.final_mrr, result.rows.last().unwrap().monthly_revenue);
        assert_eq!(
            summary.total_churned,
            result.rows.iter().map(|r| r.churned_customers).sum::<u32>()
        );
    }
}
