//! Business health metrics derived from a completed projection
//!
//! Consumes the monthly rows produced by the projection engine together with
//! the original pricing/churn/CAC/expansion inputs, and produces a single
//! snapshot of standard subscription-business ratios.

use serde::{Deserialize, Serialize};

use crate::inputs::ScenarioInputs;
use crate::projection::MonthRow;

/// Assumed gross margin in percent. A fixed policy value, not derived from inputs.
pub const GROSS_MARGIN_PCT: f64 = 80.0;

/// Valuation multiple applied to ARR
pub const ARR_VALUATION_MULTIPLE: f64 = 7.0;

/// Snapshot of business-health ratios for one projection run
///
/// Percentages and ratios are rounded to one decimal place, currency values
/// to the nearest whole unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessMetrics {
    /// Customer lifetime value
    pub clv: f64,

    /// Annual recurring revenue (final month MRR x 12)
    pub arr: f64,

    /// Indicative valuation (ARR x multiple)
    pub valuation: f64,

    /// Months of per-customer revenue needed to recover one CAC
    pub cac_payback_months: f64,

    /// Assumed gross margin in percent
    pub gross_margin_pct: f64,

    /// LTV to CAC ratio
    pub ltv_cac_ratio: f64,

    /// Net revenue retention in percent (retention plus expansion)
    pub nrr_pct: f64,

    /// Gross revenue retention in percent (retention only)
    pub grr_pct: f64,

    /// Annualized revenue growth in percent over the horizon
    pub growth_rate_pct: f64,

    /// Final-month profit margin in percent
    pub profit_margin_pct: f64,

    /// Rule of 40 score (growth rate plus profit margin)
    pub rule_of_40: f64,

    /// First month whose cumulative profit is non-negative, if reached
    pub break_even_month: Option<u32>,

    /// Average revenue per user (the flat input price, passed through)
    pub arpu: f64,
}

/// Derive the metric snapshot from a completed projection
///
/// The rows are produced by the simulator and expected to be non-empty; an
/// empty slice degrades to a zeroed record rather than panicking.
pub fn derive_metrics(rows: &[MonthRow], inputs: &ScenarioInputs) -> BusinessMetrics {
    let first_mrr = rows.first().map(|r| r.monthly_revenue).unwrap_or(0.0);
    let last = rows.last();
    let final_mrr = last.map(|r| r.monthly_revenue).unwrap_or(0.0);
    let final_cost = last.map(|r| r.operating_cost).unwrap_or(0.0);

    let arr = final_mrr * 12.0;
    let valuation = arr * ARR_VALUATION_MULTIPLE;

    let clv = if inputs.churn_rate > 0.0 {
        inputs.avg_monthly_revenue / (inputs.churn_rate / 100.0)
    } else {
        // Zero churn: one year of revenue as the degenerate lifetime value
        inputs.avg_monthly_revenue * 12.0
    };

    let cac_payback = if inputs.avg_monthly_revenue > 0.0 {
        inputs.cac / inputs.avg_monthly_revenue
    } else {
        0.0
    };

    let ltv_cac = if inputs.cac > 0.0 { clv / inputs.cac } else { 0.0 };

    let retention = 1.0 - inputs.churn_rate / 100.0;
    let nrr = (retention + inputs.expansion_rate / 100.0) * 100.0;
    let grr = retention * 100.0;

    let horizon = rows.len() as f64;
    let growth = if first_mrr > 0.0 {
        (final_mrr - first_mrr) / first_mrr * 100.0 / horizon * 12.0
    } else {
        0.0
    };

    let margin = if final_mrr > 0.0 {
        (final_mrr - final_cost) / final_mrr * 100.0
    } else {
        0.0
    };

    let rule_of_40 = growth + margin;

    let break_even_month = rows
        .iter()
        .find(|r| r.cumulative_profit >= 0.0)
        .map(|r| r.month);

    BusinessMetrics {
        clv: round_whole(clv),
        arr: round_whole(arr),
        valuation: round_whole(valuation),
        cac_payback_months: round_tenth(cac_payback),
        gross_margin_pct: GROSS_MARGIN_PCT,
        ltv_cac_ratio: round_tenth(ltv_cac),
        nrr_pct: round_tenth(nrr),
        grr_pct: round_tenth(grr),
        growth_rate_pct: round_tenth(growth),
        profit_margin_pct: round_tenth(margin),
        rule_of_40: round_tenth(rule_of_40),
        break_even_month,
        arpu: round_whole(inputs.avg_monthly_revenue),
    }
}

/// Round to the nearest whole currency unit; non-finite values collapse to 0
fn round_whole(value: f64) -> f64 {
    if value.is_finite() {
        value.round()
    } else {
        0.0
    }
}

/// Round to one decimal place; non-finite values collapse to 0
fn round_tenth(value: f64) -> f64 {
    if value.is_finite() {
        (value * 10.0).round() / 10.0
    } else {
        0.0
    }
}
