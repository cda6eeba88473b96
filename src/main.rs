//! SaaS Forecast CLI
//!
//! Runs a single scenario projection, prints the month-by-month table and
//! derived metrics, and optionally exports the full series to CSV.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Months, NaiveDate};
use clap::Parser;

use saas_forecast::inputs::{load_plans, load_scenario};
use saas_forecast::projection::DEFAULT_HORIZON_MONTHS;
use saas_forecast::{Forecast, ProjectionConfig, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(
    name = "saas_forecast",
    about = "Deterministic SaaS revenue projection and business metrics"
)]
struct Cli {
    /// Scenario JSON file
    scenario: PathBuf,

    /// Pricing plan CSV (name,price,probability); overrides plans from the scenario file
    #[arg(long)]
    plans: Option<PathBuf>,

    /// Number of months to project
    #[arg(long, default_value_t = DEFAULT_HORIZON_MONTHS)]
    months: u32,

    /// Write the full monthly series to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Calendar month of the first projection period (YYYY-MM), used to label CSV rows
    #[arg(long, value_parser = parse_month)]
    start_month: Option<NaiveDate>,
}

fn parse_month(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .map_err(|err| format!("invalid month `{value}`: {err}"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut inputs = load_scenario(&cli.scenario)
        .with_context(|| format!("loading scenario {}", cli.scenario.display()))?;
    if let Some(path) = &cli.plans {
        inputs.plans =
            load_plans(path).with_context(|| format!("loading plans {}", path.display()))?;
    }

    let runner = ScenarioRunner::with_config(ProjectionConfig {
        horizon_months: cli.months,
    });
    let forecast = runner.run(&inputs);

    print_table(&forecast);

    if let Some(path) = &cli.output {
        write_csv(&forecast, path, cli.start_month)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("\nFull results written to: {}", path.display());
    }

    print_metrics(&forecast);

    Ok(())
}

/// Print the first 24 months to the console
fn print_table(forecast: &Forecast) {
    println!(
        "Projection Results ({} months):",
        forecast.projection.rows.len()
    );
    println!(
        "{:>5} {:>10} {:>10} {:>8} {:>12} {:>12} {:>12} {:>14}",
        "Month", "TotalCust", "Active", "Churned", "MRR", "Expansion", "OpCost", "CumProfit"
    );
    println!("{}", "-".repeat(90));

    for row in forecast.projection.rows.iter().take(24) {
        println!(
            "{:>5} {:>10} {:>10} {:>8} {:>12.0} {:>12.0} {:>12.0} {:>14.0}",
            row.month,
            row.total_customers,
            row.active_customers,
            row.churned_customers,
            row.monthly_revenue,
            row.expansion_revenue,
            row.operating_cost,
            row.cumulative_profit,
        );
    }

    if forecast.projection.rows.len() > 24 {
        println!("... ({} more months)", forecast.projection.rows.len() - 24);
    }
}

/// Write the full monthly series to CSV
fn write_csv(forecast: &Forecast, path: &Path, start_month: Option<NaiveDate>) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    if start_month.is_some() {
        writeln!(file, "Month,Calendar,TotalRevenue,TotalCustomers,ActiveCustomers,MRR,Churned,NetRevenue,ExpansionRevenue,OperatingCost,CumulativeProfit")?;
    } else {
        writeln!(file, "Month,TotalRevenue,TotalCustomers,ActiveCustomers,MRR,Churned,NetRevenue,ExpansionRevenue,OperatingCost,CumulativeProfit")?;
    }

    for row in &forecast.projection.rows {
        if let Some(start) = start_month {
            let label = start
                .checked_add_months(Months::new(row.month - 1))
                .map(|date| date.format("%Y-%m").to_string())
                .unwrap_or_default();
            writeln!(
                file,
                "{},{},{:.0},{},{},{:.0},{},{:.0},{:.0},{:.0},{:.0}",
                row.month,
                label,
                row.total_revenue,
                row.total_customers,
                row.active_customers,
                row.monthly_revenue,
                row.churned_customers,
                row.net_revenue,
                row.expansion_revenue,
                row.operating_cost,
                row.cumulative_profit,
            )?;
        } else {
            writeln!(
                file,
                "{},{:.0},{},{},{:.0},{},{:.0},{:.0},{:.0},{:.0}",
                row.month,
                row.total_revenue,
                row.total_customers,
                row.active_customers,
                row.monthly_revenue,
                row.churned_customers,
                row.net_revenue,
                row.expansion_revenue,
                row.operating_cost,
                row.cumulative_profit,
            )?;
        }
    }

    Ok(())
}

/// Print the derived business metrics
fn print_metrics(forecast: &Forecast) {
    let metrics = &forecast.metrics;
    let summary = forecast.projection.summary();

    println!("\nBusiness Metrics:");
    println!("  CLV: ${:.0}", metrics.clv);
    println!("  ARR: ${:.0}", metrics.arr);
    println!("  Valuation: ${:.0}", metrics.valuation);
    println!("  CAC Payback: {:.1} months", metrics.cac_payback_months);
    println!("  Gross Margin: {:.1}%", metrics.gross_margin_pct);
    println!("  LTV:CAC: {:.1}", metrics.ltv_cac_ratio);
    println!("  NRR: {:.1}%", metrics.nrr_pct);
    println!("  GRR: {:.1}%", metrics.grr_pct);
    println!("  Growth Rate: {:.1}%", metrics.growth_rate_pct);
    println!("  Profit Margin: {:.1}%", metrics.profit_margin_pct);
    println!("  Rule of 40: {:.1}", metrics.rule_of_40);
    match metrics.break_even_month {
        Some(month) => println!("  Break-even: month {month}"),
        None => println!("  Break-even: never"),
    }

    println!("\nSummary:");
    println!("  Final MRR: ${:.0}", summary.final_mrr);
    println!("  Final Active Customers: {}", summary.final_active_customers);
    println!("  Total Acquired: {}", summary.total_customers_acquired);
    println!("  Total Churned: {}", summary.total_churned);
    println!("  Cumulative Profit: ${:.0}", summary.cumulative_profit);
}
