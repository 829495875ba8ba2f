pub mod app;
pub mod event;
pub mod radar;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use crate::roster::CompetencyLevel;

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);
    tracing::debug!("tui started with {} teams", app.roster.teams().len());

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }

                // Navigation
                KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
                KeyCode::Char('l') | KeyCode::Right => app.next_member(),
                KeyCode::Char('h') | KeyCode::Left => app.previous_member(),
                KeyCode::Tab => app.next_team(),
                KeyCode::BackTab => app.previous_team(),
                KeyCode::Char('c') => app.next_category(),
                KeyCode::Char('C') => app.previous_category(),

                // Levels
                KeyCode::Char(d @ '0'..='9') => {
                    let value = d.to_digit(10).map(|v| v as u8).unwrap_or(0);
                    if let Ok(level) = CompetencyLevel::new(value) {
                        app.set_selected_level(level);
                    }
                }
                KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_selected_level(1),
                KeyCode::Char('-') => app.adjust_selected_level(-1),
                KeyCode::Char('x') => app.clear_selected_level(),

                // Roster edits
                KeyCode::Char('a') => app.start_input(app::InputTarget::Team),
                KeyCode::Char('m') => app.start_input(app::InputTarget::Members),
                KeyCode::Char('s') => app.start_input(app::InputTarget::Skills),
                KeyCode::Char('D') => app.start_delete(),

                // Export
                KeyCode::Char('e') => app.export(),

                // Help
                KeyCode::Char('?') => app.show_help(),

                _ => {}
            }
        }
        app::InputMode::TextInput(_) => {
            match key.code {
                KeyCode::Enter => app.confirm_input(),
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Backspace => {
                    app.input.pop();
                }
                // Ignore control chords so Ctrl-c doesn't type a 'c'
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.input.push(c);
                }
                _ => {}
            }
        }
        app::InputMode::ConfirmDelete => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            _ => app.cancel_delete(),
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
