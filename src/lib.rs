//! SaaS Forecast - deterministic revenue projection engine for subscription businesses
//!
//! This library provides:
//! - Month-by-month simulation of customer acquisition, churn, tiered
//!   pricing, expansion revenue, operating cost, and profit
//! - Derivation of standard business health metrics (CLV, ARR, valuation,
//!   CAC payback, LTV:CAC, NRR/GRR, Rule of 40, break-even month)
//! - Scenario loading from JSON and CSV plan tables
//! - Batch and parameter-sweep runners

pub mod inputs;
pub mod metrics;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use inputs::{AcquisitionMode, PricingPlan, ScenarioInputs};
pub use metrics::{derive_metrics, BusinessMetrics};
pub use projection::{MonthRow, ProjectionConfig, ProjectionEngine, ProjectionResult};
pub use scenario::{Forecast, ScenarioRunner, SweepParameter};
