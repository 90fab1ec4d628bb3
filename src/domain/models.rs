use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Opaque identifier assigned by the [`EmployeeStore`](super::EmployeeStore).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed set of departments an employee can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Product,
    Design,
    #[serde(rename = "Quality Assurance")]
    QualityAssurance,
    Infrastructure,
    #[serde(rename = "Human Resources")]
    HumanResources,
    Finance,
}

impl Department {
    /// All departments in display order.
    pub const ALL: [Department; 7] = [
        Department::Engineering,
        Department::Product,
        Department::Design,
        Department::QualityAssurance,
        Department::Infrastructure,
        Department::HumanResources,
        Department::Finance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Product => "Product",
            Department::Design => "Design",
            Department::QualityAssurance => "Quality Assurance",
            Department::Infrastructure => "Infrastructure",
            Department::HumanResources => "Human Resources",
            Department::Finance => "Finance",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|d| *d == self).unwrap_or(0)
    }

    /// Steps through the select list, where `None` is the empty
    /// "Select Department" entry ahead of the first department.
    pub fn cycle(current: Option<Department>, forward: bool) -> Option<Department> {
        let len = Self::ALL.len();
        match (current, forward) {
            (None, true) => Some(Self::ALL[0]),
            (None, false) => Some(Self::ALL[len - 1]),
            (Some(dept), true) => Self::ALL.get(dept.position() + 1).copied(),
            (Some(dept), false) => dept.position().checked_sub(1).map(|i| Self::ALL[i]),
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|dept| dept.as_str() == s)
            .ok_or_else(|| DomainError::UnknownDepartment(s.to_string()))
    }
}

/// An employee record as submitted by a form, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: Department,
    pub hire_date: NaiveDate,
    pub salary: u64,
}

impl NewEmployee {
    pub fn with_id(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            department: self.department,
            hire_date: self.hire_date,
            salary: self.salary,
        }
    }
}

/// A stored employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: Department,
    pub hire_date: NaiveDate,
    pub salary: u64,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The single authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub authenticated: bool,
}

/// A username/password pair accepted by the login gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new("admin", "admin123")
    }
}
