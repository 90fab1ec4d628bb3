//! Application state management for the employee directory.
//!
//! This module owns the session and employee stores and tracks which screen
//! is active, what the user is typing, and which row is selected.

use tracing::{debug, info, warn};

use super::form::{EmployeeForm, LoginForm, TextInput};
use crate::domain::{
    Employee, EmployeeId, EmployeeStore, NewEmployee, SessionStore, filter_employees,
};
use crate::infrastructure::{AppConfig, InfraError};

/// Represents the current mode of the application.
///
/// The mode decides how key presses are interpreted and which screen or
/// popup is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Login screen; the only mode available without a session
    Login,
    /// Table navigation
    Normal,
    /// User is typing a search query; the table filters live
    Search,
    /// Add or edit form is open
    Form,
    /// Waiting for the user to confirm a delete
    ConfirmDelete,
    /// CSV export file name prompt
    ExportCsv,
    /// Key reference popup
    Help,
}

/// Main application state.
///
/// Built once at startup from an [`AppConfig`] and the seed records, and
/// dropped when the event loop ends. Both stores are owned here and handed
/// to the presentation layer by reference.
///
/// # Examples
///
/// ```
/// use empdir::application::{App, AppMode};
/// use empdir::infrastructure::AppConfig;
///
/// let app = App::new(AppConfig::default(), Vec::new());
/// assert_eq!(app.mode, AppMode::Login);
/// assert!(!app.session.is_authenticated());
/// ```
#[derive(Debug)]
pub struct App {
    pub config: AppConfig,
    pub session: SessionStore,
    pub employees: EmployeeStore,
    pub mode: AppMode,
    pub login: LoginForm,
    /// Open add/edit form, present only in [`AppMode::Form`]
    pub form: Option<EmployeeForm>,
    pub search: TextInput,
    /// Selected row, as an index into [`App::visible_employees`]
    pub selected: usize,
    /// First table row drawn
    pub scroll: usize,
    /// Number of table rows that fit on screen
    pub viewport_rows: usize,
    /// Record awaiting delete confirmation
    pub pending_delete: Option<EmployeeId>,
    pub filename_input: TextInput,
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig, seed: Vec<NewEmployee>) -> Self {
        let session = SessionStore::new(config.credentials.clone());
        Self {
            config,
            session,
            employees: EmployeeStore::from_seed(seed),
            mode: AppMode::Login,
            login: LoginForm::default(),
            form: None,
            search: TextInput::default(),
            selected: 0,
            scroll: 0,
            viewport_rows: 20,
            pending_delete: None,
            filename_input: TextInput::default(),
            help_scroll: 0,
            status_message: None,
        }
    }

    fn set_mode(&mut self, mode: AppMode) {
        debug!(from = ?self.mode, to = ?mode, "mode change");
        self.mode = mode;
    }

    /// Employees matching the current search query, in store order.
    pub fn visible_employees(&self) -> Vec<&Employee> {
        filter_employees(self.employees.list(), self.search.value())
    }

    pub fn selected_employee(&self) -> Option<&Employee> {
        self.visible_employees().get(self.selected).copied()
    }

    // --- session ---

    /// Submits the login form against the session store.
    ///
    /// On failure the password is cleared and an error is shown.
    pub fn attempt_login(&mut self) -> bool {
        let username = self.login.username.value().to_string();
        if self.session.login(&username, self.login.password.value()) {
            info!(%username, "login succeeded");
            self.login.reset();
            self.status_message = None;
            self.set_mode(AppMode::Normal);
            true
        } else {
            warn!(%username, "login rejected");
            self.login.password.clear();
            self.login.error = Some("Invalid username or password".to_string());
            false
        }
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.session.session() {
            info!(username = %session.username, "logout");
        }
        self.session.logout();
        self.login.reset();
        self.form = None;
        self.pending_delete = None;
        self.search.clear();
        self.selected = 0;
        self.scroll = 0;
        self.status_message = None;
        self.set_mode(AppMode::Login);
    }

    // --- table navigation ---

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.visible_employees().len() {
            self.selected += 1;
            self.ensure_selection_visible();
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.ensure_selection_visible();
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.ensure_selection_visible();
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_employees().len().saturating_sub(1);
        self.ensure_selection_visible();
    }

    /// Updates the number of table rows that fit on screen.
    pub fn update_viewport_rows(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
        self.ensure_selection_visible();
    }

    /// Keeps the selection inside the visible list and on screen.
    pub fn ensure_selection_visible(&mut self) {
        let count = self.visible_employees().len();
        self.selected = self.selected.min(count.saturating_sub(1));

        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + self.viewport_rows {
            self.scroll = self.selected + 1 - self.viewport_rows;
        }
        self.scroll = self.scroll.min(count.saturating_sub(self.viewport_rows));
    }

    // --- search ---

    pub fn start_search(&mut self) {
        self.status_message = None;
        self.set_mode(AppMode::Search);
    }

    /// Re-applies the filter after the query changed.
    pub fn search_changed(&mut self) {
        self.selected = 0;
        self.scroll = 0;
    }

    /// Leaves search mode keeping the query.
    pub fn finish_search(&mut self) {
        self.set_mode(AppMode::Normal);
    }

    /// Leaves search mode and clears the query.
    pub fn cancel_search(&mut self) {
        self.search.clear();
        self.search_changed();
        self.set_mode(AppMode::Normal);
    }

    // --- add / edit ---

    pub fn start_add(&mut self) {
        self.form = Some(EmployeeForm::blank());
        self.status_message = None;
        self.set_mode(AppMode::Form);
    }

    /// Opens the form on the selected employee. Does nothing on an empty table.
    pub fn start_edit(&mut self) {
        let Some(form) = self.selected_employee().map(EmployeeForm::for_employee) else {
            return;
        };
        self.form = Some(form);
        self.status_message = None;
        self.set_mode(AppMode::Form);
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.set_mode(AppMode::Normal);
    }

    /// Validates the open form and, if it passes, adds or updates the record.
    ///
    /// Returns `false` and leaves the stores untouched when validation fails;
    /// the messages are stored on the form.
    pub fn submit_form(&mut self) -> bool {
        let Some(form) = self.form.as_mut() else {
            return false;
        };

        let draft = match form.to_input().validate() {
            Ok(draft) => draft,
            Err(errors) => {
                debug!(count = errors.len(), "form rejected");
                form.errors = errors;
                return false;
            }
        };

        let touched = match form.editing.clone() {
            Some(id) => {
                if self.employees.update(draft.with_id(id.clone())) {
                    info!(%id, "employee updated");
                    self.status_message = Some("Employee updated".to_string());
                } else {
                    warn!(%id, "update matched no employee");
                }
                id
            }
            None => {
                let added = self.employees.add(draft);
                info!(id = %added.id, "employee added");
                self.status_message = Some("Employee added".to_string());
                added.id
            }
        };

        self.form = None;
        self.set_mode(AppMode::Normal);
        if let Some(index) = self.visible_employees().iter().position(|e| e.id == touched) {
            self.selected = index;
        }
        self.ensure_selection_visible();
        true
    }

    // --- delete ---

    /// Asks for confirmation before deleting the selected employee.
    pub fn request_delete(&mut self) {
        let Some(id) = self.selected_employee().map(|e| e.id.clone()) else {
            return;
        };
        self.pending_delete = Some(id);
        self.status_message = None;
        self.set_mode(AppMode::ConfirmDelete);
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            if let Some(removed) = self.employees.delete(&id) {
                info!(%id, name = %removed.full_name(), "employee deleted");
                self.status_message = Some(format!("Deleted {}", removed.full_name()));
            }
        }
        self.set_mode(AppMode::Normal);
        self.ensure_selection_visible();
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.set_mode(AppMode::Normal);
    }

    // --- export / clipboard ---

    pub fn start_csv_export(&mut self) {
        self.filename_input = TextInput::new(self.config.export_filename.clone());
        self.status_message = None;
        self.set_mode(AppMode::ExportCsv);
    }

    /// The file name to export to, falling back to the configured default.
    pub fn csv_export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            self.config.export_filename.clone()
        } else {
            self.filename_input.value().to_string()
        }
    }

    pub fn cancel_filename_input(&mut self) {
        self.filename_input.clear();
        self.set_mode(AppMode::Normal);
    }

    pub fn set_csv_export_result(&mut self, filename: &str, result: Result<usize, InfraError>) {
        match result {
            Ok(rows) => {
                info!(%filename, rows, "csv export");
                self.status_message = Some(format!("Exported {rows} employees to {filename}"));
            }
            Err(error) => {
                warn!(%filename, %error, "csv export failed");
                self.status_message = Some(format!("Export failed: {error}"));
            }
        }
        self.filename_input.clear();
        self.set_mode(AppMode::Normal);
    }

    pub fn set_clipboard_result(&mut self, copied: &str, result: Result<(), InfraError>) {
        self.status_message = Some(match result {
            Ok(()) => format!("Copied {copied} to clipboard"),
            Err(error) => {
                warn!(%error, "clipboard copy failed");
                format!("Copy failed: {error}")
            }
        });
    }

    // --- help ---

    pub fn open_help(&mut self) {
        self.help_scroll = 0;
        self.set_mode(AppMode::Help);
    }

    pub fn close_help(&mut self) {
        self.set_mode(AppMode::Normal);
    }
}
