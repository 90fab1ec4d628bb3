use std::fmt::Write;

use crate::application::{App, AppMode, EmployeeForm, LoginField, TextInput};
use crate::domain::{Employee, FormField};
use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
};

/// Screen rows used by everything around the table body: header, search
/// box, status bar, table borders and column headings.
pub const TABLE_CHROME_ROWS: u16 = 10;

pub fn render_ui(f: &mut Frame, app: &App) {
    if app.mode == AppMode::Login {
        render_login(f, app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_search(f, app, chunks[1]);
    render_table(f, app, chunks[2]);
    render_status_bar(f, app, chunks[3]);

    match app.mode {
        AppMode::Form => {
            if let Some(form) = &app.form {
                render_form_popup(f, form);
            }
        }
        AppMode::ConfirmDelete => render_confirm_popup(f, app),
        AppMode::Help => render_help_popup(f, app.help_scroll),
        _ => {}
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn place_cursor(f: &mut Frame, area: Rect, offset: usize, input: &TextInput) {
    let x = area.x as usize + offset + input.cursor();
    let max_x = (area.x + area.width).saturating_sub(1) as usize;
    f.set_cursor_position((x.min(max_x) as u16, area.y));
}

fn render_login(f: &mut Frame, app: &App) {
    let area = centered_rect(f.area(), 50, 11);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} - Login", app.config.title))
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let focus_style = |field: LoginField| {
        if app.login.focus == field {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    };

    let username_label = "Username: ";
    let password_label = "Password: ";
    let masked = "*".repeat(app.login.password.value().chars().count());

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(username_label, focus_style(LoginField::Username)),
            Span::raw(app.login.username.value()),
        ])),
        rows[1],
    );
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(password_label, focus_style(LoginField::Password)),
            Span::raw(masked),
        ])),
        rows[3],
    );

    if let Some(error) = &app.login.error {
        f.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            rows[5],
        );
    }

    f.render_widget(
        Paragraph::new("Enter: login | Tab: switch field | Ctrl+C: quit")
            .style(Style::default().fg(Color::DarkGray)),
        rows[6],
    );

    match app.login.focus {
        LoginField::Username => {
            place_cursor(f, rows[1], username_label.len(), &app.login.username)
        }
        LoginField::Password => {
            place_cursor(f, rows[3], password_label.len(), &app.login.password)
        }
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let username = app
        .session
        .session()
        .map(|s| s.username.as_str())
        .unwrap_or_default();
    let header = Paragraph::new(format!(
        "{} | Welcome, {}! | {} employees",
        app.config.title,
        username,
        app.employees.len()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_search(f: &mut Frame, app: &App, area: Rect) {
    let searching = app.mode == AppMode::Search;
    let text = if app.search.is_empty() && !searching {
        Span::styled(
            "Search by name, email, or position... (press /)",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(app.search.value())
    };
    let style = if searching {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let search = Paragraph::new(Line::from(text))
        .block(Block::default().borders(Borders::ALL).title("Search"))
        .style(style);
    f.render_widget(search, area);

    if searching {
        let line = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        place_cursor(f, line, 0, &app.search);
    }
}

/// Formats an amount with thousands separators, e.g. `₹1,250,000`.
pub fn format_salary(symbol: &str, amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{symbol}{grouped}")
}

/// Formats a date with a chrono pattern, falling back to ISO 8601 when the
/// pattern is invalid.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return date.to_string();
    }
    out
}

fn employee_row<'a>(app: &App, employee: &'a Employee, selected: bool) -> Row<'a> {
    let style = if selected {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default()
    };
    Row::new(vec![
        Cell::from(employee.full_name()),
        Cell::from(employee.email.as_str()),
        Cell::from(employee.phone.as_str()),
        Cell::from(employee.position.as_str()),
        Cell::from(employee.department.as_str()),
        Cell::from(format_date(employee.hire_date, &app.config.date_format)),
        Cell::from(format_salary(&app.config.currency_symbol, employee.salary)),
    ])
    .style(style)
    .height(1)
}

fn render_table(f: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible_employees();
    let block = Block::default().borders(Borders::ALL);

    if visible.is_empty() {
        let empty = Paragraph::new("No employees found")
            .block(block.title("Employees"))
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, area);
        return;
    }

    let headers = [
        "Name",
        "Email",
        "Phone",
        "Position",
        "Department",
        "Hire Date",
        "Salary",
    ]
    .into_iter()
    .map(|h| Cell::from(h).style(Style::default().fg(Color::Yellow)));
    let header_row = Row::new(headers).height(1);

    let body_rows = area.height.saturating_sub(3) as usize;
    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .skip(app.scroll)
        .take(body_rows)
        .map(|(i, employee)| employee_row(app, employee, i == app.selected))
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(3),
        Constraint::Length(16),
        Constraint::Fill(2),
        Constraint::Length(17),
        Constraint::Length(11),
        Constraint::Length(13),
    ];
    let table = Table::new(rows, widths)
        .header(header_row)
        .block(block.title(format!("Employees ({} shown)", visible.len())))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                concat!(
                    "a: add | e/Enter: edit | d: delete | /: search | y: copy email | ",
                    "Ctrl+E: export CSV | L: logout | ?: help | q: quit"
                )
                .to_string()
            }
        }
        AppMode::Search => "Type to filter (Enter to keep, Esc to clear)".to_string(),
        AppMode::Form => {
            "Tab/↑↓: field | ←→: department | Enter: save | Esc: cancel".to_string()
        }
        AppMode::ConfirmDelete => "y: delete | n/Esc: keep".to_string(),
        AppMode::ExportCsv => format!(
            "Export CSV as: {} (Enter to export, Esc to cancel)",
            app.filename_input.value()
        ),
        AppMode::Help => {
            "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string()
        }
        AppMode::Login => String::new(),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Search => Style::default().fg(Color::Green),
            AppMode::Form => Style::default().fg(Color::Yellow),
            AppMode::ConfirmDelete => Style::default().fg(Color::Red),
            AppMode::ExportCsv => Style::default().fg(Color::Magenta),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::Normal | AppMode::Login => Style::default(),
        });
    f.render_widget(input, area);

    if app.mode == AppMode::ExportCsv {
        let line = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        place_cursor(f, line, "Export CSV as: ".len(), &app.filename_input);
    }
}

const FORM_LABEL_WIDTH: usize = 14;

fn render_form_popup(f: &mut Frame, form: &EmployeeForm) {
    let height = FormField::ALL.len() as u16 * 2 + 2;
    let area = centered_rect(f.area(), 64, height);
    f.render_widget(Clear, area);

    let title = if form.is_edit() { "Edit Employee" } else { "Add Employee" };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(FormField::ALL.iter().map(|_| Constraint::Length(2)))
        .split(inner);

    for (field, row) in FormField::ALL.iter().copied().zip(rows.iter()) {
        let focused = form.focus == field;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let label = format!("{:<width$}", format!("{} *", field.label()), width = FORM_LABEL_WIDTH);

        let value = match form.input(field) {
            Some(input) => Span::raw(input.value().to_string()),
            None => match form.department {
                Some(dept) => Span::raw(format!("< {dept} >")),
                None => Span::styled("< Select Department >", Style::default().fg(Color::DarkGray)),
            },
        };

        let mut lines = vec![Line::from(vec![Span::styled(label, label_style), value])];
        if let Some(message) = form.errors.get(field) {
            lines.push(Line::from(Span::styled(
                format!("{:width$}{message}", "", width = FORM_LABEL_WIDTH),
                Style::default().fg(Color::Red),
            )));
        }
        f.render_widget(Paragraph::new(lines), *row);

        if focused {
            if let Some(input) = form.input(field) {
                place_cursor(f, *row, FORM_LABEL_WIDTH, input);
            }
        }
    }
}

fn render_confirm_popup(f: &mut Frame, app: &App) {
    let area = centered_rect(f.area(), 56, 5);
    f.render_widget(Clear, area);

    let name = app
        .pending_delete
        .as_ref()
        .and_then(|id| app.employees.get(id))
        .map(Employee::full_name)
        .unwrap_or_default();
    let text = vec![
        Line::from("Are you sure you want to delete this employee?"),
        Line::from(Span::styled(name, Style::default().add_modifier(Modifier::BOLD))),
        Line::from("(y/n)"),
    ];
    let popup = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Confirm Delete")
            .style(Style::default().fg(Color::Red)),
    );
    f.render_widget(popup, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("Keys (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"EMPLOYEE DIRECTORY KEYS

=== TABLE ===
↑↓ or j/k       Move selection
Home/g End/G    First / last employee
a               Add employee
e or Enter      Edit selected employee
d or Delete     Delete selected employee (asks first)
y               Copy selected email to clipboard
/               Search by name, email, or position
Esc             Clear the search
Ctrl+E          Export the shown employees to CSV
L               Log out
F1 or ?         Show this help
q               Quit

=== SEARCH ===
Typing          Filters the table as you type
Enter           Keep the query and return to the table
Esc             Clear the query

=== FORM ===
Tab / ↓         Next field
Shift+Tab / ↑   Previous field
← →             Choose department
Enter           Save (all fields are required)
Esc             Cancel without saving

Hire dates use YYYY-MM-DD. Salary must be greater than 0.

=== HELP ===
↑↓ or j/k       Scroll one line
Page Up/Down    Scroll 5 lines
Home            Jump to top
Esc/F1/?/q      Close this window

Ctrl+C quits from any screen."#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Department, NewEmployee};
    use crate::infrastructure::AppConfig;
    use ratatui::{Terminal, backend::TestBackend};

    fn app() -> App {
        App::new(
            AppConfig::default(),
            vec![NewEmployee {
                first_name: "Ann".to_string(),
                last_name: "Lee".to_string(),
                email: "ann@x.com".to_string(),
                phone: "1".to_string(),
                position: "Dev".to_string(),
                department: Department::HumanResources,
                hire_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                salary: 1_250_000,
            }],
        )
    }

    fn logged_in() -> App {
        let mut app = app();
        app.login.username = TextInput::new("admin");
        app.login.password = TextInput::new("admin123");
        app.attempt_login();
        app
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_format_salary() {
        assert_eq!(format_salary("₹", 0), "₹0");
        assert_eq!(format_salary("₹", 999), "₹999");
        assert_eq!(format_salary("$", 1000), "$1,000");
        assert_eq!(format_salary("", 1_250_000), "1,250,000");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_date(date, "%Y-%m-%d"), "2024-03-09");
        assert_eq!(format_date(date, "%d/%m/%Y"), "09/03/2024");
        assert_eq!(format_date(date, "%Q"), "2024-03-09");
    }

    #[test]
    fn test_login_screen_masks_password() {
        let mut app = app();
        app.login.username = TextInput::new("admin");
        app.login.password = TextInput::new("secret");
        let screen = draw(&app);
        assert!(screen.contains("ProU Technology - Login"));
        assert!(screen.contains("Username: admin"));
        assert!(screen.contains("Password: ******"));
        assert!(!screen.contains("secret"));
        assert!(!screen.contains("Ann Lee"));
    }

    #[test]
    fn test_login_error_is_shown() {
        let mut app = app();
        app.login.username = TextInput::new("admin");
        app.login.password = TextInput::new("nope");
        app.attempt_login();
        assert!(draw(&app).contains("Invalid username or password"));
    }

    #[test]
    fn test_table_after_login() {
        let screen = draw(&logged_in());
        assert!(screen.contains("Welcome, admin!"));
        assert!(screen.contains("Ann Lee"));
        assert!(screen.contains("Human Resources"));
        assert!(screen.contains("₹1,250,000"));
        assert!(screen.contains("2024-01-01"));
    }

    #[test]
    fn test_empty_filter_message() {
        let mut app = logged_in();
        app.search = TextInput::new("zzz");
        assert!(draw(&app).contains("No employees found"));
    }

    #[test]
    fn test_form_shows_validation_messages() {
        let mut app = logged_in();
        app.start_add();
        app.submit_form();
        let screen = draw(&app);
        assert!(screen.contains("Add Employee"));
        assert!(screen.contains("First name is required"));
        assert!(screen.contains("Salary must be greater than 0"));
        assert!(screen.contains("< Select Department >"));
    }

    #[test]
    fn test_edit_form_title() {
        let mut app = logged_in();
        app.start_edit();
        let screen = draw(&app);
        assert!(screen.contains("Edit Employee"));
        assert!(screen.contains("< Human Resources >"));
    }

    #[test]
    fn test_confirm_delete_popup() {
        let mut app = logged_in();
        app.request_delete();
        let screen = draw(&app);
        assert!(screen.contains("Are you sure you want to delete this employee?"));
    }
}
