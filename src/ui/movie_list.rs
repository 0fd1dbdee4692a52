use crate::app::App;
use crate::ui::movie_card::movie_card_lines;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use tui_big_text::{BigText, PixelSize};

/// Renders the primary pane: every added movie as a card
pub fn render_movie_list(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.movies.is_empty() {
        render_empty_list(frame, area);
        return;
    }

    let title = format!("Movies ({} - Use ↑↓ to scroll)", app.movies.len());

    let items: Vec<ListItem> = app
        .movies
        .movies()
        .iter()
        .map(|movie| {
            let mut content = movie_card_lines(movie);
            content.push(Line::from(""));
            ListItem::new(content)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_empty_list(frame: &mut Frame, area: Rect) {
    let block = Block::default().title("Movies").borders(Borders::ALL);
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Top padding
            Constraint::Length(4), // Big text
            Constraint::Min(1),    // Hint
        ])
        .split(inner_area);

    let big_text = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .lines(vec!["NO MOVIES".into()])
        .alignment(Alignment::Center)
        .build();

    frame.render_widget(big_text, chunks[1]);

    let hint = Paragraph::new(Line::from(Span::styled(
        "Search for a title and add it to the list",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);

    frame.render_widget(hint, chunks[2]);
}
