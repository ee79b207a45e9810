//! Search box in the header

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{App, InputMode};
use crate::ui::{sanitize, Theme};

/// Draw the search input; the caret is shown only while editing
pub fn render_search_box(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;

    let line = if editing {
        let (before, after) = app.search.split_at_cursor();
        Line::from(vec![
            Span::styled("⌕ ", Theme::dimmed()),
            Span::raw(sanitize(before)),
            Span::styled("│", Style::default().fg(Theme::PRIMARY)),
            Span::raw(sanitize(after)),
        ])
    } else if app.search.query.is_empty() {
        Line::from(Span::styled("⌕ Press / to search...", Theme::dimmed()))
    } else {
        Line::from(vec![
            Span::styled("⌕ ", Theme::dimmed()),
            Span::raw(sanitize(&app.search.query)),
        ])
    };

    let border_style = if editing {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let search_box = Paragraph::new(line).style(Theme::input()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(" SEARCH ", Theme::title())),
    );
    frame.render_widget(search_box, area);
}
