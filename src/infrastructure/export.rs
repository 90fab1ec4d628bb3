use std::path::Path;

use serde::Serialize;

use crate::domain::{Employee, HIRE_DATE_FORMAT};

use super::errors::InfraError;

#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    phone: &'a str,
    position: &'a str,
    department: &'static str,
    hire_date: String,
    salary: u64,
}

impl<'a> From<&'a Employee> for CsvRow<'a> {
    fn from(e: &'a Employee) -> Self {
        Self {
            id: e.id.as_str(),
            first_name: &e.first_name,
            last_name: &e.last_name,
            email: &e.email,
            phone: &e.phone,
            position: &e.position,
            department: e.department.as_str(),
            hire_date: e.hire_date.format(HIRE_DATE_FORMAT).to_string(),
            salary: e.salary,
        }
    }
}

pub struct CsvExporter;

impl CsvExporter {
    /// Writes `employees` to `path`, one row each under a header line.
    ///
    /// Returns the number of rows written.
    pub fn export_to_csv(
        employees: &[&Employee],
        path: impl AsRef<Path>,
    ) -> Result<usize, InfraError> {
        let mut writer = csv::Writer::from_path(path)?;
        for employee in employees {
            writer.serialize(CsvRow::from(*employee))?;
        }
        writer.flush()?;
        Ok(employees.len())
    }
}
