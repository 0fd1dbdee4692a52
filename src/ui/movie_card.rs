use crate::app::movie::Movie;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use ratatui_image::{Resize, StatefulImage, protocol::StatefulProtocol};

/// Text of a movie card: title, description, poster URL and IMDb link.
pub fn movie_card_lines(movie: &Movie) -> Vec<Line<'_>> {
    let description = if movie.description().is_empty() {
        Span::styled("No description", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(movie.description(), Style::default().fg(Color::White))
    };

    vec![
        Line::from(Span::styled(
            movie.title(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(description),
        Line::from(vec![
            Span::styled("Poster: ", Style::default().fg(Color::Gray)),
            Span::styled(movie.img_url(), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("IMDb: ", Style::default().fg(Color::Gray)),
            Span::styled(
                movie.imdb_url(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
    ]
}

/// Renders a movie card, with the poster on top when one is available
pub fn render_movie_card(
    frame: &mut Frame,
    area: Rect,
    movie: &Movie,
    poster: Option<&mut StatefulProtocol>,
) {
    let text_area = match poster {
        Some(protocol) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Percentage(60), // Poster
                    Constraint::Min(4),         // Text
                ])
                .split(area);

            let image = StatefulImage::<StatefulProtocol>::default().resize(Resize::Fit(None));
            frame.render_stateful_widget(image, chunks[0], protocol);
            chunks[1]
        }
        None => area,
    };

    let card = Paragraph::new(movie_card_lines(movie)).wrap(Wrap { trim: true });
    frame.render_widget(card, text_area);
}
