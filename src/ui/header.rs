use crate::app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the header/title block at the top of the screen
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let count = match app.movies.len() {
        1 => "1 movie in the list".to_string(),
        n => format!("{} movies in the list", n),
    };

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "Movie Finder",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  ({})", count), Style::default().fg(Color::Gray)),
    ]))
    .block(title_block);

    frame.render_widget(title, area);
}
