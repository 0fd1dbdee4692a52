use crate::app::App;
use crate::app::form::SearchState;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, Borders, Paragraph},
};

/// Returns the appropriate instruction text based on app state
fn get_instruction_text(app: &App) -> &'static str {
    match app.form.state() {
        SearchState::Loading { .. } => "Searching OMDb... (Esc) to quit",
        SearchState::Found(_) => {
            "(Tab) add to the list, (Enter) search again, (↑↓) scroll, (Esc) quit"
        }
        SearchState::Idle | SearchState::NotFound => {
            if app.movies.is_empty() {
                "Type a movie title, (Enter) to search, (Esc) to quit"
            } else {
                "Type a movie title, (Enter) search, (↑↓) scroll, (Esc) quit"
            }
        }
    }
}

/// Renders the footer with instructions at the bottom of the screen
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let bottom_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let instruction_text = get_instruction_text(app);
    let bottom = Paragraph::new(Text::styled(instruction_text, Style::default()))
        .block(bottom_block);

    frame.render_widget(bottom, area);
}
