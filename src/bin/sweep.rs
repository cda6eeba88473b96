//! Parameter sensitivity sweep over a scenario
//!
//! Runs the same scenario with one parameter varied across a value grid,
//! in parallel, and prints one summary line per value.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use saas_forecast::inputs::load_scenario;
use saas_forecast::projection::DEFAULT_HORIZON_MONTHS;
use saas_forecast::{ProjectionConfig, ScenarioRunner, SweepParameter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Parameter {
    ChurnRate,
    AvgMonthlyRevenue,
    Cac,
    ExpansionRate,
}

impl From<Parameter> for SweepParameter {
    fn from(parameter: Parameter) -> Self {
        match parameter {
            Parameter::ChurnRate => SweepParameter::ChurnRate,
            Parameter::AvgMonthlyRevenue => SweepParameter::AvgMonthlyRevenue,
            Parameter::Cac => SweepParameter::Cac,
            Parameter::ExpansionRate => SweepParameter::ExpansionRate,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "sweep", about = "Sensitivity sweep over one scenario parameter")]
struct Cli {
    /// Scenario JSON file
    scenario: PathBuf,

    /// Parameter to vary
    #[arg(long, value_enum, default_value_t = Parameter::ChurnRate)]
    parameter: Parameter,

    /// First grid value
    #[arg(long)]
    from: f64,

    /// Last grid value (inclusive)
    #[arg(long)]
    to: f64,

    /// Number of grid points
    #[arg(long, default_value_t = 11)]
    steps: usize,

    /// Number of months to project per run
    #[arg(long, default_value_t = DEFAULT_HORIZON_MONTHS)]
    months: u32,

    /// Write per-value results to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let inputs = load_scenario(&cli.scenario)
        .with_context(|| format!("loading scenario {}", cli.scenario.display()))?;

    let values = grid(cli.from, cli.to, cli.steps);
    let parameter = SweepParameter::from(cli.parameter);

    let runner = ScenarioRunner::with_config(ProjectionConfig {
        horizon_months: cli.months,
    });

    let start = Instant::now();
    let forecasts = runner.run_sweep(&inputs, parameter, &values);
    println!(
        "Swept {} values of {} in {:?}\n",
        forecasts.len(),
        parameter.label(),
        start.elapsed()
    );

    println!(
        "{:>12} {:>12} {:>10} {:>14} {:>10} {:>10}",
        parameter.label(),
        "FinalMRR",
        "Active",
        "CumProfit",
        "RuleOf40",
        "BreakEven"
    );
    println!("{}", "-".repeat(74));

    for (value, forecast) in values.iter().zip(&forecasts) {
        let summary = forecast.projection.summary();
        let break_even = forecast
            .metrics
            .break_even_month
            .map(|m| m.to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "{:>12.2} {:>12.0} {:>10} {:>14.0} {:>10.1} {:>10}",
            value,
            summary.final_mrr,
            summary.final_active_customers,
            summary.cumulative_profit,
            forecast.metrics.rule_of_40,
            break_even,
        );
    }

    if let Some(path) = &cli.output {
        let mut file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        writeln!(
            file,
            "{},final_mrr,final_active,cumulative_profit,arr,rule_of_40,break_even_month",
            parameter.label()
        )?;
        for (value, forecast) in values.iter().zip(&forecasts) {
            let summary = forecast.projection.summary();
            writeln!(
                file,
                "{},{:.0},{},{:.0},{:.0},{:.1},{}",
                value,
                summary.final_mrr,
                summary.final_active_customers,
                summary.cumulative_profit,
                forecast.metrics.arr,
                forecast.metrics.rule_of_40,
                forecast
                    .metrics
                    .break_even_month
                    .map(|m| m.to_string())
                    .unwrap_or_default(),
            )?;
        }
        println!("\nSweep results written to: {}", path.display());
    }

    Ok(())
}

/// Evenly spaced inclusive grid from `from` to `to`
fn grid(from: f64, to: f64, steps: usize) -> Vec<f64> {
    if steps <= 1 {
        return vec![from];
    }
    (0..steps)
        .map(|i| from + (to - from) * i as f64 / (steps - 1) as f64)
        .collect()
}
