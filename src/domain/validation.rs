//! Presence checks applied to employee forms before they reach the store.

use chrono::NaiveDate;

use super::errors::{FormField, ValidationErrors};
use super::models::{Department, Employee, NewEmployee};

/// Date format expected in the hire date field.
pub const HIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw, unvalidated form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: Option<Department>,
    pub hire_date: String,
    pub salary: String,
}

impl From<&Employee> for EmployeeInput {
    fn from(employee: &Employee) -> Self {
        Self {
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            position: employee.position.clone(),
            department: Some(employee.department),
            hire_date: employee.hire_date.format(HIRE_DATE_FORMAT).to_string(),
            salary: employee.salary.to_string(),
        }
    }
}

impl EmployeeInput {
    /// Checks every field and converts the input into a typed record.
    ///
    /// All violations are collected, not just the first one.
    pub fn validate(&self) -> Result<NewEmployee, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        require(&mut errors, FormField::FirstName, &self.first_name, "First name is required");
        require(&mut errors, FormField::LastName, &self.last_name, "Last name is required");
        require(&mut errors, FormField::Email, &self.email, "Email is required");
        if !self.email.contains('@') {
            errors.add(FormField::Email, "Valid email is required");
        }
        require(&mut errors, FormField::Phone, &self.phone, "Phone is required");
        require(&mut errors, FormField::Position, &self.position, "Position is required");

        if self.department.is_none() {
            errors.add(FormField::Department, "Department is required");
        }

        let hire_date = if self.hire_date.is_empty() {
            errors.add(FormField::HireDate, "Hire date is required");
            None
        } else {
            match NaiveDate::parse_from_str(self.hire_date.trim(), HIRE_DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add(
                        FormField::HireDate,
                        "Hire date must be a valid date (YYYY-MM-DD)",
                    );
                    None
                }
            }
        };

        let salary = match parse_salary(&self.salary) {
            Some(0) => {
                errors.add(FormField::Salary, "Salary must be greater than 0");
                0
            }
            Some(amount) => amount,
            None => {
                errors.add(FormField::Salary, "Salary is too large");
                0
            }
        };

        match (self.department, hire_date) {
            (Some(department), Some(hire_date)) if errors.is_empty() => Ok(NewEmployee {
                first_name: self.first_name.clone(),
                last_name: self.last_name.clone(),
                email: self.email.clone(),
                phone: self.phone.clone(),
                position: self.position.clone(),
                department,
                hire_date,
                salary,
            }),
            _ => Err(errors),
        }
    }
}

fn require(errors: &mut ValidationErrors, field: FormField, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

/// Reads the leading whole number of `raw`, ignoring anything after it, so
/// `"50000.5"` is 50000 and `"1,000"` is 1. Empty, non-numeric and negative
/// input is 0. `None` means the digits do not fit in a `u64`.
fn parse_salary(raw: &str) -> Option<u64> {
    let text = raw.trim_start();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if digits.is_empty() || negative {
        return Some(0);
    }
    digits.parse().ok()
}
