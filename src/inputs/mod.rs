//! Scenario input domain: business parameters, pricing plans, and loaders

mod data;
pub mod loader;

pub use data::{AcquisitionMode, PricingPlan, ScenarioInputs};
pub use loader::{load_plans, load_scenario, InputError};
