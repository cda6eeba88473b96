//! AWS Lambda handler for running forecasts
//!
//! Accepts a scenario as a JSON event and returns the derived metrics, the
//! run summary, and optionally the full monthly series.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

use saas_forecast::projection::{ProjectionSummary, DEFAULT_HORIZON_MONTHS};
use saas_forecast::{BusinessMetrics, MonthRow, ProjectionConfig, ScenarioInputs, ScenarioRunner};

fn default_months() -> u32 {
    DEFAULT_HORIZON_MONTHS
}

/// Input payload for a forecast request
#[derive(Debug, Deserialize)]
struct ForecastRequest {
    /// Scenario inputs; clamped into valid ranges before projection
    scenario: ScenarioInputs,

    /// Number of months to project (default: 60)
    #[serde(default = "default_months")]
    months: u32,

    /// Whether to include the full monthly series in the response
    #[serde(default)]
    include_rows: bool,
}

/// Response payload
#[derive(Debug, Serialize)]
struct ForecastResponse {
    metrics: BusinessMetrics,
    summary: ProjectionSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<Vec<MonthRow>>,
}

async fn handler(event: LambdaEvent<ForecastRequest>) -> Result<ForecastResponse, Error> {
    let request = event.payload;
    let inputs = request.scenario.clamped();

    let runner = ScenarioRunner::with_config(ProjectionConfig {
        horizon_months: request.months,
    });
    let forecast = runner.run(&inputs);
    let summary = forecast.projection.summary();

    Ok(ForecastResponse {
        metrics: forecast.metrics,
        summary,
        rows: request.include_rows.then_some(forecast.projection.rows),
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
