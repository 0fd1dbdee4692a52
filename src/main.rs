mod app;
use app::App;

mod config;
mod error;
mod logging;
mod ui;

use std::error::Error;
use std::io::{self, Stderr};
use std::sync::Arc;
use std::time::Duration;

use ratatui::Terminal;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use ratatui_image::picker::Picker;
use tracing::info;

use crate::app::omd::OmdbClient;

fn main() -> Result<(), Box<dyn Error>> {
    let config = config::load_config()?;
    logging::init_logging(&config.log_dir)?;
    info!(
        config_path = %config::config_path().display(),
        omdb = %config.omdb.base_url,
        "starting movie_finder"
    );

    let lookup = Arc::new(OmdbClient::new(config.omdb.clone(), config.links.clone())?);

    // setup terminal
    enable_raw_mode()?;
    let mut stderr = io::stderr(); // This is a special case. Normally using stdout is fine
    execute!(stderr, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    // Query the terminal for graphics support before reading any events
    let picker = Picker::from_query_stdio().unwrap_or_else(|_| Picker::halfblocks());

    // create app and run it
    let mut app = App::new(lookup, config.links, picker);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal loop failed");
    }
    info!(movies = app.movies.len(), "exiting");

    result?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stderr>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        // Pick up lookup and poster results from worker threads
        app.process_messages();

        // Poll for events with a timeout to allow UI updates
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Release {
                    // Skip events that are not KeyEventKind::Press
                    continue;
                }
                if !handle_key(app, key) {
                    return Ok(());
                }
            }
        }

        app.tick();
    }
}

/// Applies a key press to the app. Returns false when the user asked to quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => return false,
        KeyCode::Char('c') if ctrl => return false,
        KeyCode::Char('u') if ctrl => app.clear_query(),
        // Only plain or shifted characters are text
        KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
            app.push_char(c)
        }
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Enter => app.submit_search(),
        KeyCode::Tab => app.add_preview(),
        KeyCode::Down => app.next_movie(),
        KeyCode::Up => app.previous_movie(),
        _ => {}
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::form::SearchState;
    use crate::app::movie::MovieLinks;
    use crate::app::omd::{LookupResult, MovieLookup};
    use crate::error::{Error, Result};
    use image::DynamicImage;

    struct OfflineLookup;

    impl MovieLookup for OfflineLookup {
        fn find_by_title(&self, _title: &str) -> LookupResult {
            LookupResult::NotFound {
                reason: "offline".to_string(),
            }
        }

        fn fetch_poster(&self, _url: &str) -> Result<DynamicImage> {
            Err(Error::Io(std::io::Error::other("offline")))
        }
    }

    fn new_app() -> App {
        App::new(Arc::new(OfflineLookup), MovieLinks::default(), Picker::halfblocks())
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
        handle_key(app, KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_typing_plain_and_shifted_chars() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('R'), KeyModifiers::SHIFT);
        press(&mut app, KeyCode::Char('u'), KeyModifiers::NONE);
        press(&mut app, KeyCode::Char('s'), KeyModifiers::NONE);
        press(&mut app, KeyCode::Char('h'), KeyModifiers::NONE);

        assert_eq!(app.form.query(), "Rush");
    }

    #[test]
    fn test_modified_chars_are_not_typed() {
        let mut app = new_app();
        app.form.set_query("Rush");

        assert!(press(&mut app, KeyCode::Char('x'), KeyModifiers::ALT));
        assert!(press(&mut app, KeyCode::Char('k'), KeyModifiers::CONTROL));
        assert_eq!(app.form.query(), "Rush");
    }

    #[test]
    fn test_ctrl_u_clears_query() {
        let mut app = new_app();
        app.form.set_query("Rush");

        assert!(press(&mut app, KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(app.form.query(), "");
        assert_eq!(app.form.state(), &SearchState::Idle);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = new_app();
        assert!(!press(&mut app, KeyCode::Esc, KeyModifiers::NONE));
        assert!(!press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(press(&mut app, KeyCode::Char('c'), KeyModifiers::NONE));
        assert_eq!(app.form.query(), "c");
    }
}
