//! Scenario runner composing the projection engine and metric derivation
//!
//! Pre-configures a horizon once, then runs one or many scenarios without
//! rebuilding engines; batches and parameter sweeps run in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::inputs::ScenarioInputs;
use crate::metrics::{derive_metrics, BusinessMetrics};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// Complete outcome of one scenario run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// The inputs the run was made with
    pub inputs: ScenarioInputs,

    /// Month-by-month projection
    pub projection: ProjectionResult,

    /// Derived business metrics
    pub metrics: BusinessMetrics,
}

/// Input parameter varied across a sensitivity sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    ChurnRate,
    AvgMonthlyRevenue,
    Cac,
    ExpansionRate,
}

impl SweepParameter {
    /// Column label for tabular output
    pub fn label(&self) -> &'static str {
        match self {
            SweepParameter::ChurnRate => "churn_rate",
            SweepParameter::AvgMonthlyRevenue => "avg_monthly_revenue",
            SweepParameter::Cac => "cac",
            SweepParameter::ExpansionRate => "expansion_rate",
        }
    }

    /// Produce a variant of `base` with this parameter set to `value`
    ///
    /// The variant goes through the same range clamps as loaded input.
    fn apply(&self, base: &ScenarioInputs, value: f64) -> ScenarioInputs {
        let mut inputs = base.clone();
        match self {
            SweepParameter::ChurnRate => inputs.churn_rate = value,
            SweepParameter::AvgMonthlyRevenue => inputs.avg_monthly_revenue = value,
            SweepParameter::Cac => inputs.cac = value,
            SweepParameter::ExpansionRate => inputs.expansion_rate = value,
        }
        inputs.clamped()
    }
}

/// Pre-configured runner for single, batch, and sweep projections
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: ProjectionConfig,
}

impl ScenarioRunner {
    /// Create a runner with the default 60-month horizon
    pub fn new() -> Self {
        Self {
            config: ProjectionConfig::default(),
        }
    }

    /// Create a runner with an explicit projection config
    pub fn with_config(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// The projection config used for every run
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run a single scenario and derive its metrics
    pub fn run(&self, inputs: &ScenarioInputs) -> Forecast {
        let engine = ProjectionEngine::new(self.config.clone());
        let projection = engine.project(inputs);
        let metrics = derive_metrics(&projection.rows, inputs);

        Forecast {
            inputs: inputs.clone(),
            projection,
            metrics,
        }
    }

    /// Run many scenarios in parallel, preserving input order
    pub fn run_batch(&self, scenarios: &[ScenarioInputs]) -> Vec<Forecast> {
        scenarios.par_iter().map(|inputs| self.run(inputs)).collect()
    }

    /// Run a sensitivity sweep varying one parameter across a value grid
    pub fn run_sweep(
        &self,
        base: &ScenarioInputs,
        parameter: SweepParameter,
        values: &[f64],
    ) -> Vec<Forecast> {
        log::debug!(
            "sweeping {} across {} values",
            parameter.label(),
            values.len()
        );
        values
            .par_iter()
            .map(|&value| self.run(&parameter.apply(base, value)))
            .collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
