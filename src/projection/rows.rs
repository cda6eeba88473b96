//! Monthly output rows for projection runs

use serde::{Deserialize, Serialize};

/// A single month of projection output
///
/// Currency fields are rounded to the nearest whole unit at emission;
/// customer counts are integers by construction. Revenue and profit fields
/// whose names carry no qualifier are cumulative to date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    /// Projection month (1-indexed)
    pub month: u32,

    /// Cumulative gross revenue to date
    pub total_revenue: f64,

    /// Cumulative customers acquired to date
    pub total_customers: u32,

    /// Active customers at end of month
    pub active_customers: u32,

    /// Gross recurring revenue recognized this month
    pub monthly_revenue: f64,

    /// Customers lost to churn this month
    pub churned_customers: u32,

    /// Cumulative revenue net of acquisition spend to date
    pub net_revenue: f64,

    /// Expansion revenue contribution this month
    pub expansion_revenue: f64,

    /// Operating cost this month (per-user costs plus acquisition spend)
    pub operating_cost: f64,

    /// Cumulative profit to date
    pub cumulative_profit: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Monthly rows, ordered by month ascending
    pub rows: Vec<MonthRow>,
}

impl ProjectionResult {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Add a monthly row
    pub fn add_row(&mut self, row: MonthRow) {
        self.rows.push(row);
    }

    /// Get summary statistics for the whole run
    pub fn summary(&self) -> ProjectionSummary {
        let total_churned: u32 = self.rows.iter().map(|r| r.churned_customers).sum();
        let total_operating_cost: f64 = self.rows.iter().map(|r| r.operating_cost).sum();
        let last = self.rows.last();

        ProjectionSummary {
            total_months: self.rows.len() as u32,
            final_mrr: last.map(|r| r.monthly_revenue).unwrap_or(0.0),
            final_active_customers: last.map(|r| r.active_customers).unwrap_or(0),
            total_customers_acquired: last.map(|r| r.total_customers).unwrap_or(0),
            total_churned,
            total_revenue: last.map(|r| r.total_revenue).unwrap_or(0.0),
            total_operating_cost,
            cumulative_profit: last.map(|r| r.cumulative_profit).unwrap_or(0.0),
        }
    }
}

impl Default for ProjectionResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub final_mrr: f64,
    pub final_active_customers: u32,
    pub total_customers_acquired: u32,
    pub total_churned: u32,
    pub total_revenue: f64,
    pub total_operating_cost: f64,
    pub cumulative_profit: f64,
}
