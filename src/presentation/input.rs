use crate::application::{App, AppMode, TextInput};
use crate::domain::FormField;
use crate::infrastructure::{CsvExporter, copy_to_clipboard};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Login => Self::handle_login_mode(app, key, modifiers),
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Search => Self::handle_search_mode(app, key, modifiers),
            AppMode::Form => Self::handle_form_mode(app, key, modifiers),
            AppMode::ConfirmDelete => Self::handle_confirm_delete_mode(app, key),
            AppMode::ExportCsv => Self::handle_filename_input_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    /// Line-editing keys shared by every text field. Chords with Ctrl or Alt
    /// never insert text.
    fn edit_text(input: &mut TextInput, key: KeyCode, modifiers: KeyModifiers) {
        if matches!(key, KeyCode::Char(_))
            && modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return;
        }
        match key {
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.home(),
            KeyCode::End => input.end(),
            KeyCode::Char(c) => input.insert(c),
            _ => {}
        }
    }

    fn handle_login_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Enter => {
                app.attempt_login();
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                app.login.toggle_focus();
            }
            _ => {
                Self::edit_text(app.login.focused_input(), key, modifiers);
            }
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('e') = key {
                app.start_csv_export();
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Home | KeyCode::Char('g') => app.select_first(),
            KeyCode::End | KeyCode::Char('G') => app.select_last(),
            KeyCode::Char('a') => app.start_add(),
            KeyCode::Enter | KeyCode::Char('e') => app.start_edit(),
            KeyCode::Delete | KeyCode::Char('d') => app.request_delete(),
            KeyCode::Char('/') => app.start_search(),
            KeyCode::Char('y') => {
                if let Some(email) = app.selected_employee().map(|e| e.email.clone()) {
                    let result = copy_to_clipboard(&email);
                    app.set_clipboard_result(&email, result);
                }
            }
            KeyCode::Char('L') => app.logout(),
            KeyCode::F(1) | KeyCode::Char('?') => app.open_help(),
            KeyCode::Esc => {
                if !app.search.is_empty() {
                    app.cancel_search();
                }
            }
            // 'q' is handled by the main loop
            _ => {}
        }
    }

    fn handle_search_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Enter => app.finish_search(),
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Down => app.select_next(),
            KeyCode::Up => app.select_previous(),
            _ => {
                let before = app.search.value().to_string();
                Self::edit_text(&mut app.search, key, modifiers);
                if app.search.value() != before {
                    app.search_changed();
                }
            }
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Enter => {
                app.submit_form();
                return;
            }
            KeyCode::Esc => {
                app.cancel_form();
                return;
            }
            _ => {}
        }

        let Some(form) = app.form.as_mut() else {
            return;
        };
        let on_select = form.focus == FormField::Department;
        match key {
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
            KeyCode::Right | KeyCode::Char(' ') if on_select => form.cycle_department(true),
            KeyCode::Left if on_select => form.cycle_department(false),
            _ => {
                if let Some(input) = form.focused_input() {
                    Self::edit_text(input, key, modifiers);
                }
            }
        }
    }

    fn handle_confirm_delete_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Enter => {
                let filename = app.csv_export_filename();
                let result = CsvExporter::export_to_csv(&app.visible_employees(), &filename);
                app.set_csv_export_result(&filename, result);
            }
            KeyCode::Esc => app.cancel_filename_input(),
            _ => {
                Self::edit_text(&mut app.filename_input, key, modifiers);
            }
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Department, NewEmployee};
    use crate::infrastructure::AppConfig;
    use chrono::NaiveDate;

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn app_with_one() -> App {
        App::new(
            AppConfig::default(),
            vec![NewEmployee {
                first_name: "Ann".to_string(),
                last_name: "Lee".to_string(),
                email: "ann@x.com".to_string(),
                phone: "1".to_string(),
                position: "Dev".to_string(),
                department: Department::Engineering,
                hire_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                salary: 50_000,
            }],
        )
    }

    fn log_in(app: &mut App) {
        type_text(app, "admin");
        press(app, KeyCode::Tab);
        type_text(app, "admin123");
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_login_via_keys() {
        let mut app = app_with_one();
        type_text(&mut app, "admin");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "wrong");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Login);
        assert!(!app.session.is_authenticated());

        // focus stays on the password field after a failed attempt
        type_text(&mut app, "admin123");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.session.is_authenticated());
    }

    #[test]
    fn test_q_is_text_on_login_screen() {
        let mut app = app_with_one();
        type_text(&mut app, "q");
        assert_eq!(app.login.username.value(), "q");
    }

    #[test]
    fn test_add_employee_via_keys() {
        let mut app = app_with_one();
        log_in(&mut app);

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, AppMode::Form);

        type_text(&mut app, "Bob");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Ray");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "bob@x.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "2");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "QA");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(
            app.form.as_ref().unwrap().department,
            Some(Department::QualityAssurance)
        );
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "2023-07-15");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "65000");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.employees.len(), 2);
        let bob = &app.employees.list()[1];
        assert_eq!(bob.full_name(), "Bob Ray");
        assert_eq!(bob.salary, 65_000);
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_submit_empty_form_shows_errors() {
        let mut app = app_with_one();
        log_in(&mut app);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::Form);
        assert_eq!(app.employees.len(), 1);
        let errors = &app.form.as_ref().unwrap().errors;
        assert_eq!(errors.get(FormField::FirstName), Some("First name is required"));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.employees.len(), 1);
    }

    #[test]
    fn test_edit_via_keys() {
        let mut app = app_with_one();
        log_in(&mut app);
        press(&mut app, KeyCode::Char('e'));
        // first name field, cursor at end
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "lice");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.employees.len(), 1);
        assert_eq!(app.employees.list()[0].first_name, "Alice");
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = app_with_one();
        log_in(&mut app);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, AppMode::ConfirmDelete);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.employees.len(), 1);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.mode, AppMode::ConfirmDelete);
        press(&mut app, KeyCode::Char('y'));
        assert!(app.employees.is_empty());
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_live_search() {
        let mut app = app_with_one();
        log_in(&mut app);
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "zz");
        assert!(app.visible_employees().is_empty());
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "ANN");
        assert_eq!(app.visible_employees().len(), 1);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.search.value(), "ANN");

        press(&mut app, KeyCode::Esc);
        assert!(app.search.is_empty());
    }

    #[test]
    fn test_modifier_chords_do_not_insert_text() {
        let mut app = app_with_one();
        log_in(&mut app);
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "an");
        InputHandler::handle_key_event(&mut app, KeyCode::Char('e'), KeyModifiers::CONTROL);
        InputHandler::handle_key_event(&mut app, KeyCode::Char('x'), KeyModifiers::ALT);
        InputHandler::handle_key_event(&mut app, KeyCode::Char('N'), KeyModifiers::SHIFT);
        assert_eq!(app.search.value(), "anN");
        assert_eq!(app.mode, AppMode::Search);

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('a'));
        InputHandler::handle_key_event(&mut app, KeyCode::Char('w'), KeyModifiers::CONTROL);
        let form = app.form.as_ref().unwrap();
        assert!(form.first_name.is_empty());
    }

    #[test]
    fn test_logout_key() {
        let mut app = app_with_one();
        log_in(&mut app);
        press(&mut app, KeyCode::Char('L'));
        assert_eq!(app.mode, AppMode::Login);
        assert!(!app.session.is_authenticated());
    }

    #[test]
    fn test_csv_export_key_binding() {
        let mut app = app_with_one();
        log_in(&mut app);
        InputHandler::handle_key_event(&mut app, KeyCode::Char('e'), KeyModifiers::CONTROL);
        assert_eq!(app.mode, AppMode::ExportCsv);
        assert_eq!(app.filename_input.value(), "employees.csv");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.filename_input.is_empty());
    }

    #[test]
    fn test_csv_export_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("staff.csv");
        let mut app = app_with_one();
        log_in(&mut app);

        InputHandler::handle_key_event(&mut app, KeyCode::Char('e'), KeyModifiers::CONTROL);
        app.filename_input = TextInput::new(path.to_string_lossy());
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::Normal);
        assert!(path.exists());
        assert!(app.status_message.as_deref().unwrap().starts_with("Exported 1 employees"));
    }

    #[test]
    fn test_help_mode_scrolls_and_closes() {
        let mut app = app_with_one();
        log_in(&mut app);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode, AppMode::Help);
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.help_scroll, 4);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.mode, AppMode::Normal);
    }
}
