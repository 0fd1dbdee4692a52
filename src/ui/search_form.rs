use crate::app::form::{NOT_FOUND_MESSAGE, SearchState};
use crate::app::{App, PosterState};
use crate::ui::loading::{render_loading, spinner_span};
use crate::ui::movie_card::render_movie_card;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the side pane: title input, error, controls and preview
pub fn render_search_form(frame: &mut Frame, app: &mut App, area: Rect) {
    let outer_block = Block::default()
        .title("Find a movie")
        .borders(Borders::ALL);

    let inner_area = outer_block.inner(area);
    frame.render_widget(outer_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Label
            Constraint::Length(3), // Input
            Constraint::Length(1), // Error message
            Constraint::Length(1), // Controls
            Constraint::Length(1), // Spacing
            Constraint::Min(0),    // Preview
        ])
        .split(inner_area);

    frame.render_widget(Paragraph::new("Movie title"), chunks[0]);
    render_input(frame, app, chunks[1]);

    if app.form.has_error() {
        let error = Paragraph::new(Span::styled(
            NOT_FOUND_MESSAGE,
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(error, chunks[2]);
    }

    render_controls(frame, app, chunks[3]);
    render_preview(frame, app, chunks[5]);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.form.has_error() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let text = if app.form.query().is_empty() {
        Span::styled("Enter a title to search", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.form.query())
    };

    let query_width = app.form.query().chars().count() as u16;
    let text_width = area.width.saturating_sub(2);
    let offset = input_scroll(query_width, text_width);

    let input = Paragraph::new(Line::from(text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .scroll((0, offset));
    frame.render_widget(input, area);

    let cursor_x = area.x + 1 + (query_width - offset);
    frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
}

/// Columns to scroll so the end of the query and the cursor after it stay visible.
fn input_scroll(query_width: u16, text_width: u16) -> u16 {
    query_width.saturating_sub(text_width.saturating_sub(1))
}

fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let find_style = if app.form.can_submit() {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::styled("[ ", find_style)];
    if app.form.is_loading() {
        spans.push(spinner_span(&app.throbber_state));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("Find a movie (Enter) ]", find_style));

    if app.form.preview().is_some() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "[ Add to the list (Tab) ]",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_preview(frame: &mut Frame, app: &mut App, area: Rect) {
    match app.form.state() {
        SearchState::Loading { .. } => {
            render_loading(frame, area, &mut app.throbber_state, "Searching OMDb...");
        }
        SearchState::Found(movie) => {
            let preview_block = Block::default().title("Preview").borders(Borders::ALL);
            let mut card_area = preview_block.inner(area);
            frame.render_widget(preview_block, area);

            let poster = match &mut app.poster {
                PosterState::Ready { imdb_id, protocol } if imdb_id.as_str() == movie.imdb_id() => {
                    Some(&mut **protocol)
                }
                PosterState::Loading { .. } => {
                    let chunks = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([Constraint::Length(1), Constraint::Min(0)])
                        .split(card_area);
                    render_loading(
                        frame,
                        chunks[0],
                        &mut app.throbber_state,
                        "Downloading poster...",
                    );
                    card_area = chunks[1];
                    None
                }
                _ => None,
            };

            render_movie_card(frame, card_area, movie, poster);
        }
        SearchState::Idle | SearchState::NotFound => {}
    }
}
