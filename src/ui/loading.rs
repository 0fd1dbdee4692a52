use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
};
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, ThrobberState, WhichUse};

fn throbber(label: &str) -> Throbber<'_> {
    Throbber::default()
        .label(label)
        .style(Style::default().fg(Color::Cyan))
        .throbber_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .throbber_set(BRAILLE_SIX)
        .use_type(WhichUse::Spin)
}

/// Renders a one-line busy indicator. Holds no state of its own; the caller
/// advances `state` on every tick.
pub fn render_loading(frame: &mut Frame, area: Rect, state: &mut ThrobberState, label: &str) {
    frame.render_stateful_widget(throbber(label), area, state);
}

/// Just the spinner glyph, for marking a control as busy.
pub fn spinner_span(state: &ThrobberState) -> Span<'static> {
    throbber("").to_symbol_span(state)
}
