//! Terminal UI components
//!
//! Every renderer is a function of the `App` state it is handed; nothing
//! here mutates state. Strings from the catalog go through [`sanitize`]
//! before they reach a widget.

pub mod detail;
pub mod episodes;
pub mod grid;
pub mod hero;
pub mod search;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};

use crate::app::{App, Focus, InputMode};
use crate::models;

/// Strip control characters so catalog text cannot inject terminal escapes
pub fn sanitize(s: &str) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}

/// Truncate to `max` characters, marking the cut with `…`
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Centered rect taking the given percentages of `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Draw the whole screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Theme::text()), area);

    // Header, category tabs, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    render_body(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);

    if app.modal.is_open() {
        detail::render_modal(frame, area, app);
    }

    if let Some(ref error) = app.error {
        render_error_popup(frame, area, error);
    }
}

/// Logo plus search box
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Min(1)])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled("CINE", Style::default().fg(Theme::PRIMARY).add_modifier(Modifier::BOLD)),
        Span::styled("GRID", Theme::title()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, header_chunks[0]);

    search::render_search_box(frame, header_chunks[1], app);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = app
        .categories
        .iter()
        .enumerate()
        .map(|(i, action)| {
            Line::from(vec![
                Span::styled(format!("{} ", i + 1), Theme::keybind()),
                Span::raw(models::section_title(action)),
            ])
        })
        .collect();

    let selected = if app.view.is_searching {
        None
    } else {
        app.category_index()
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Theme::dimmed())
        .highlight_style(Style::default().fg(Theme::TEXT).add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
        .divider(Span::styled("│", Theme::dimmed()));
    frame.render_widget(tabs, area);
}

/// Hero banner above the titled grid
fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    let hero_height = if app.hero.is_some() { hero::HERO_HEIGHT } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(hero_height),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    hero::render_hero(frame, chunks[0], app.hero.as_ref(), app.focus == Focus::Hero);

    let heading = Paragraph::new(Line::from(vec![
        Span::styled("▌", Style::default().fg(Theme::PRIMARY)),
        Span::styled(sanitize(&app.section_title), Theme::title()),
    ]));
    frame.render_widget(heading, chunks[1]);

    if app.grid.is_loading() {
        grid::render_skeleton(frame, chunks[2]);
    } else {
        let selected = (app.focus == Focus::Grid).then_some(app.grid.selected);
        grid::render_grid(frame, chunks[2], app.grid.items(), selected, &app.image_fallback);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::SECONDARY),
        ),
        InputMode::Editing => Span::styled(
            " SEARCH ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT),
        ),
    };

    let source = if app.view.is_searching {
        Span::styled(" searching ", Theme::secondary())
    } else {
        Span::styled(format!(" {} ", app.view.current_action), Theme::dimmed())
    };

    let mut spans = vec![mode_indicator, source, Span::raw("│ ")];
    for &(key, desc) in key_hints(app) {
        spans.push(Span::styled(key, Theme::keybind()));
        spans.push(Span::styled(format!(":{}  ", desc), Theme::keybind_desc()));
    }

    let status = Paragraph::new(Line::from(spans)).style(Theme::status_bar());
    frame.render_widget(status, area);
}

fn key_hints(app: &App) -> &'static [(&'static str, &'static str)] {
    if app.modal.is_open() {
        &[("Tab", "focus"), ("Enter", "play"), ("o", "open"), ("Esc", "close")]
    } else if app.input_mode == InputMode::Editing {
        &[("Enter/Esc", "done"), ("^U", "clear")]
    } else {
        &[("/", "search"), ("1-9", "category"), ("Enter", "detail"), ("r", "reload"), ("q", "quit")]
    }
}

fn render_error_popup(frame: &mut Frame, area: Rect, error: &str) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height: u16 = 5;

    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height.min(area.height),
    };

    frame.render_widget(Clear, popup_area);

    let error_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(sanitize(error), Theme::error())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ ERROR ", Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(error_block, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_escape_sequences() {
        assert_eq!(sanitize("Bad\x1b[31mTitle\x07"), "Bad[31mTitle");
        assert_eq!(sanitize("Line\nBreak\tTab"), "LineBreakTab");
        assert_eq!(sanitize("Café ★"), "Café ★");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long title", 6), "a lon…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_centered_rect_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let rect = centered_rect(80, 80, area);
        assert!(rect.x >= 10 && rect.y >= 5);
        assert!(rect.right() <= 100 && rect.bottom() <= 50);
    }
}
