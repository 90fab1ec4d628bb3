use crate::domain::Credentials;

/// Startup settings handed to [`App::new`](crate::application::App::new).
///
/// Values are fixed at build time; nothing here is read from the
/// environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// The only username/password pair accepted at login
    pub credentials: Credentials,
    /// Shown in the header bar
    pub title: String,
    /// Prefix for salary amounts in the table
    pub currency_symbol: String,
    /// chrono format string for hire dates in the table
    pub date_format: String,
    /// Suggested file name for CSV export
    pub export_filename: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            title: "ProU Technology".to_string(),
            currency_symbol: "₹".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            export_filename: "employees.csv".to_string(),
        }
    }
}
