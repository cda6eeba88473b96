//! Scenario and pricing plan file loaders
//!
//! Scenarios are JSON documents deserializing into [`ScenarioInputs`];
//! pricing plans can also be supplied as a CSV table with a
//! `name,price,probability` header. Loaded values are clamped into their
//! valid ranges before being handed to the engine.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;
use thiserror::Error;

use super::data::{PricingPlan, ScenarioInputs};

/// Errors raised while loading scenario or plan files
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid pricing plan table: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid numeric value in pricing plan table: {0}")]
    Numeric(#[from] std::num::ParseFloatError),

    #[error("pricing plan row {0} has fewer than 3 columns")]
    MalformedRow(usize),
}

/// Load a scenario from a JSON file, clamping all ranges
pub fn load_scenario(path: &Path) -> Result<ScenarioInputs, InputError> {
    let file = File::open(path)?;
    let inputs: ScenarioInputs = serde_json::from_reader(file)?;
    info!(
        "loaded scenario from {} ({} pricing plans)",
        path.display(),
        inputs.plans.len()
    );
    Ok(inputs.clamped())
}

/// Load pricing plans from a CSV file with a `name,price,probability` header
pub fn load_plans(path: &Path) -> Result<Vec<PricingPlan>, InputError> {
    let file = File::open(path)?;
    let plans = read_plans(file)?;
    info!("loaded {} pricing plans from {}", plans.len(), path.display());
    Ok(plans)
}

/// Read pricing plans from any CSV source
pub fn read_plans<R: Read>(reader: R) -> Result<Vec<PricingPlan>, InputError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut plans = Vec::new();

    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        if record.len() < 3 {
            return Err(InputError::MalformedRow(row + 1));
        }

        let name = record[0].trim().to_string();
        let price: f64 = record[1].trim().parse()?;
        let probability: f64 = record[2].trim().parse()?;

        plans.push(PricingPlan::new(name, price, probability));
    }

    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_plans_from_csv() {
        let data = "name,price,probability\nBasic,10,60\nPro,50,40\n";
        let plans = read_plans(data.as_bytes()).unwrap();

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].name, "Basic");
        assert_eq!(plans[0].price, 10.0);
        assert_eq!(plans[0].probability, 60.0);
        assert_eq!(plans[1].name, "Pro");
        assert!(plans[1].id > plans[0].id);
    }

    #[test]
    fn test_read_plans_rejects_short_rows() {
        let data = "name,price,probability\nBasic,10\n";
        assert!(matches!(
            read_plans(data.as_bytes()),
            Err(InputError::MalformedRow(1))
        ));
    }

    #[test]
    fn test_scenario_json_defaults_and_clamping() {
        let json = r#"{
            "target_income": 10000,
            "avg_monthly_revenue": 50,
            "churn_rate": 250,
            "cac": 100,
            "plans": [{"name": "Basic", "price": 10, "probability": 60}]
        }"#;

        let inputs: ScenarioInputs = serde_json::from_str(json).unwrap();
        let inputs = inputs.clamped();

        assert_eq!(inputs.churn_rate, 100.0);
        assert_eq!(inputs.expansion_rate, 0.0);
        assert_eq!(inputs.plans.len(), 1);
        assert!(inputs.plans[0].id > 0);
        assert_eq!(inputs.monthly_acquisition(), 200);
    }

    #[test]
    fn test_fixed_acquisition_round_trip() {
        let json = r#"{
            "target_income": 10000,
            "avg_monthly_revenue": 50,
            "churn_rate": 5,
            "cac": 100,
            "acquisition": {"fixed": 120}
        }"#;

        let inputs: ScenarioInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.monthly_acquisition(), 120);

        let back = serde_json::to_string(&inputs).unwrap();
        let again: ScenarioInputs = serde_json::from_str(&back).unwrap();
        assert_eq!(again.monthly_acquisition(), 120);
    }
}
