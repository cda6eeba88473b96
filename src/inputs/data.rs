//! Scenario input structures for the projection engine

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_PLAN_ID: AtomicU32 = AtomicU32::new(1);

/// Allocate a stable surrogate key for a pricing plan
fn next_plan_id() -> u32 {
    NEXT_PLAN_ID.fetch_add(1, Ordering::Relaxed)
}

/// How new customers are acquired each month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionMode {
    /// Derive a constant monthly volume from target_income / avg_monthly_revenue
    Auto,
    /// Fixed monthly acquisition volume
    Fixed(u32),
}

impl Default for AcquisitionMode {
    fn default() -> Self {
        AcquisitionMode::Auto
    }
}

/// A single tier in the pricing plan mix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPlan {
    /// Surrogate key assigned at creation time
    #[serde(default = "next_plan_id")]
    pub id: u32,

    /// Display name (not used in calculations)
    pub name: String,

    /// Monthly price of the tier
    pub price: f64,

    /// Relative weight of the tier; normalized against the sum at point of use
    pub probability: f64,
}

impl PricingPlan {
    /// Create a new plan with a freshly assigned id
    pub fn new(name: impl Into<String>, price: f64, probability: f64) -> Self {
        Self {
            id: next_plan_id(),
            name: name.into(),
            price,
            probability,
        }
    }
}

/// Complete set of business parameters for one projection run
///
/// Ranges are clamped at the input boundary (see [`ScenarioInputs::clamped`]);
/// the projection engine itself does not re-validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInputs {
    /// Goal monthly recurring revenue
    pub target_income: f64,

    /// Flat per-customer monthly price; also the basis for CAC payback and
    /// CLV regardless of whether tiered plans are supplied
    pub avg_monthly_revenue: f64,

    /// Tiered pricing mix; empty means flat-rate pricing
    #[serde(default)]
    pub plans: Vec<PricingPlan>,

    /// Monthly attrition of the active customer pool, percent in [0, 100]
    pub churn_rate: f64,

    /// Cost to acquire one new customer
    pub cac: f64,

    /// Monthly upsell as a percent of the prior month's revenue
    #[serde(default)]
    pub expansion_rate: f64,

    /// Support cost per active customer per month
    #[serde(default)]
    pub support_cost_per_user: f64,

    /// Infrastructure cost per active customer per month
    #[serde(default)]
    pub infra_cost_per_user: f64,

    /// Monthly acquisition volume, fixed or derived
    #[serde(default)]
    pub acquisition: AcquisitionMode,
}

impl ScenarioInputs {
    /// Create inputs with flat-rate pricing and no per-user costs
    pub fn new(target_income: f64, avg_monthly_revenue: f64, churn_rate: f64, cac: f64) -> Self {
        Self {
            target_income,
            avg_monthly_revenue,
            plans: Vec::new(),
            churn_rate,
            cac,
            expansion_rate: 0.0,
            support_cost_per_user: 0.0,
            infra_cost_per_user: 0.0,
            acquisition: AcquisitionMode::Auto,
        }
    }

    /// Constant monthly acquisition volume for the whole run
    ///
    /// Computed once at the start of a projection, never per month.
    pub fn monthly_acquisition(&self) -> u32 {
        match self.acquisition {
            AcquisitionMode::Fixed(volume) => volume,
            AcquisitionMode::Auto => {
                if self.avg_monthly_revenue > 0.0 {
                    (self.target_income / self.avg_monthly_revenue).ceil() as u32
                } else {
                    0
                }
            }
        }
    }

    /// Clamp all parameters into their valid ranges
    ///
    /// Currency amounts and weights floor at 0, churn is held in [0, 100],
    /// non-finite values collapse to 0, and a fixed acquisition volume of 0
    /// falls back to auto derivation.
    pub fn clamped(mut self) -> Self {
        self.target_income = clamp_amount(self.target_income);
        self.avg_monthly_revenue = clamp_amount(self.avg_monthly_revenue);
        self.churn_rate = if self.churn_rate.is_finite() {
            self.churn_rate.clamp(0.0, 100.0)
        } else {
            0.0
        };
        self.cac = clamp_amount(self.cac);
        self.expansion_rate = clamp_amount(self.expansion_rate);
        self.support_cost_per_user = clamp_amount(self.support_cost_per_user);
        self.infra_cost_per_user = clamp_amount(self.infra_cost_per_user);

        for plan in &mut self.plans {
            plan.price = clamp_amount(plan.price);
            plan.probability = clamp_amount(plan.probability);
        }

        if self.acquisition == AcquisitionMode::Fixed(0) {
            self.acquisition = AcquisitionMode::Auto;
        }

        self
    }
}

/// Non-negative finite amount, 0 otherwise
fn clamp_amount(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_acquisition_from_target() {
        let inputs = ScenarioInputs::new(10_000.0, 50.0, 10.0, 100.0);
        assert_eq!(inputs.monthly_acquisition(), 200);

        // Non-integral ratio rounds up
        let inputs = ScenarioInputs::new(10_000.0, 48.0, 10.0, 100.0);
        assert_eq!(inputs.monthly_acquisition(), 209);
    }

    #[test]
    fn test_auto_acquisition_zero_price() {
        let inputs = ScenarioInputs::new(10_000.0, 0.0, 10.0, 100.0);
        assert_eq!(inputs.monthly_acquisition(), 0);
    }

    #[test]
    fn test_fixed_acquisition_override() {
        let mut inputs = ScenarioInputs::new(10_000.0, 50.0, 10.0, 100.0);
        inputs.acquisition = AcquisitionMode::Fixed(37);
        assert_eq!(inputs.monthly_acquisition(), 37);
    }

    #[test]
    fn test_clamped_ranges() {
        let mut inputs = ScenarioInputs::new(-500.0, f64::NAN, 180.0, -1.0);
        inputs.expansion_rate = f64::INFINITY;
        inputs.acquisition = AcquisitionMode::Fixed(0);
        inputs.plans.push(PricingPlan::new("Basic", -10.0, -5.0));

        let clamped = inputs.clamped();
        assert_eq!(clamped.target_income, 0.0);
        assert_eq!(clamped.avg_monthly_revenue, 0.0);
        assert_eq!(clamped.churn_rate, 100.0);
        assert_eq!(clamped.cac, 0.0);
        assert_eq!(clamped.expansion_rate, 0.0);
        assert_eq!(clamped.acquisition, AcquisitionMode::Auto);
        assert_eq!(clamped.plans[0].price, 0.0);
        assert_eq!(clamped.plans[0].probability, 0.0);
    }

    #[test]
    fn test_plan_ids_are_unique_and_increasing() {
        let a = PricingPlan::new("Basic", 10.0, 60.0);
        let b = PricingPlan::new("Pro", 50.0, 40.0);
        assert!(b.id > a.id);
    }
}
