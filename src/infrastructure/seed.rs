//! Example records loaded into the directory at startup.

use crate::domain::NewEmployee;

use super::errors::InfraError;

const SEED_JSON: &str = include_str!("../../data/seed_employees.json");

/// Parses the built-in example employees.
pub fn seed_employees() -> Result<Vec<NewEmployee>, InfraError> {
    parse_seed(SEED_JSON)
}

pub fn parse_seed(json: &str) -> Result<Vec<NewEmployee>, InfraError> {
    Ok(serde_json::from_str(json)?)
}
