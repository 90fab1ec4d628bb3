//! empdir - Terminal Employee Directory
//!
//! Shows a login screen, then a searchable table of employees that can be
//! added, edited and deleted. Records live in memory for the life of the
//! process.

use std::fs::File;
use std::io;
use std::sync::Mutex;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use tracing_subscriber::EnvFilter;

use empdir::application::{App, AppMode};
use empdir::infrastructure::{AppConfig, seed_employees};
use empdir::presentation::{InputHandler, TABLE_CHROME_ROWS, render_ui};

const LOG_ENV: &str = "EMPDIR_LOG";
const LOG_FILE: &str = "empdir.log";

/// Entry point for the employee directory.
///
/// Sets up the terminal, builds the application state from the default
/// configuration and the built-in seed records, and runs the event loop
/// until the user quits.
///
/// # Errors
///
/// Returns an error if the seed data cannot be parsed or the terminal
/// cannot be set up.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let mut app = App::new(AppConfig::default(), seed_employees()?);
    tracing::info!(employees = app.employees.len(), "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(%err, "event loop failed");
        eprintln!("{err:?}");
    }

    Ok(())
}

/// Logs go to a file only when `EMPDIR_LOG` holds a filter, since the
/// terminal belongs to the UI.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return Ok(());
    };
    let file = File::create(std::env::temp_dir().join(LOG_FILE))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|error| format!("failed to initialize tracing subscriber: {error}"))?;
    Ok(())
}

/// Main event loop: draw, read one key, dispatch.
///
/// `q` quits from the table; Ctrl+C quits from anywhere.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        let size = terminal.size()?;
        app.update_viewport_rows(size.height.saturating_sub(TABLE_CHROME_ROWS) as usize);
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Char('q') if app.mode == AppMode::Normal => return Ok(()),
                _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
            }
        }
    }
}
