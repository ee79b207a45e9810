//! Detail modal
//!
//! Drawn over the browse page. Shows a spinner while the record loads, the
//! failure message if it could not be fetched, or the info, player and
//! episode panels once it arrives.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, DetailFocus, DetailView, Modal};
use crate::ui::{centered_rect, episodes, sanitize, Theme};

/// Shown when the detail request fails
pub const FAILURE_MESSAGE: &str = "Gagal memuat detail konten.";

/// Spinner animation, advanced once per tick
pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

/// Draw the open modal over `area`
pub fn render_modal(frame: &mut Frame, area: Rect, app: &App) {
    let modal_area = centered_rect(84, 84, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(" DETAIL ", Theme::title()))
        .title_bottom(Line::from(Span::styled(" Esc close ", Theme::keybind_desc())).right_aligned())
        .style(Theme::text());

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    match &app.modal {
        Modal::Closed => {}
        Modal::Loading { .. } => render_centered(
            frame,
            inner,
            Line::from(vec![
                Span::styled(spinner_frame(app.tick), Theme::loading()),
                Span::styled(" Loading...", Theme::dimmed()),
            ]),
        ),
        Modal::Failed => render_centered(
            frame,
            inner,
            Line::from(Span::styled(FAILURE_MESSAGE, Theme::error())),
        ),
        Modal::Shown(view) => render_detail(frame, inner, view, &app.image_fallback),
    }
}

fn render_centered(frame: &mut Frame, area: Rect, line: Line) {
    let y = area.y + area.height / 2;
    let row = Rect {
        y,
        height: 1u16.min(area.height),
        ..area
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
}

fn render_detail(frame: &mut Frame, area: Rect, view: &DetailView, fallback: &str) {
    let episodes_height = if view.has_episodes() {
        Constraint::Percentage(45)
    } else {
        Constraint::Length(0)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(4), episodes_height])
        .split(area);

    render_info(frame, chunks[0], view, fallback);
    render_player(frame, chunks[1], view);
    if view.has_episodes() {
        episodes::render_episodes(frame, chunks[2], view);
    }
}

fn render_info(frame: &mut Frame, area: Rect, view: &DetailView, fallback: &str) {
    let detail = &view.detail;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if view.focus == DetailFocus::Info {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(" INFO ", Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut badges = Vec::new();
    if let Some(rating) = detail.rating.as_deref().filter(|r| !r.is_empty()) {
        badges.push(Span::styled(format!("★ {}", sanitize(rating)), Theme::accent()));
        badges.push(Span::styled(" │ ", Theme::dimmed()));
    }
    if let Some(year) = detail.year.as_deref().filter(|y| !y.is_empty()) {
        badges.push(Span::styled(sanitize(year), Theme::secondary()));
        badges.push(Span::styled(" │ ", Theme::dimmed()));
    }
    if let Some(kind) = detail.kind.as_deref().filter(|k| !k.is_empty()) {
        badges.push(Span::styled(format!(" {} ", sanitize(&kind.to_uppercase())), Theme::badge()));
    }

    let poster = detail
        .poster
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or(fallback);

    let lines = vec![
        Line::from(Span::styled(sanitize(&detail.title), Theme::title())),
        Line::from(badges),
        Line::from(Span::styled(format!("Poster: {}", sanitize(poster)), Theme::dimmed())),
        Line::from(Span::styled("─".repeat(inner.width as usize), Theme::dimmed())),
        Line::from(Span::styled(
            sanitize(detail.description_or_placeholder()),
            Theme::text(),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((view.scroll, 0));
    frame.render_widget(paragraph, inner);
}

fn render_player(frame: &mut Frame, area: Rect, view: &DetailView) {
    let focused = view.focus == DetailFocus::Player;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(" PLAYER ", Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match view.player_url.as_deref() {
        Some(url) => vec![
            Line::from(vec![
                Span::styled("▶ ", Style::default().fg(Theme::PRIMARY)),
                Span::styled(sanitize(url), Theme::secondary()),
            ]),
            Line::from(vec![
                Span::styled("o", Theme::keybind()),
                Span::styled(":open in browser", Theme::keybind_desc()),
            ]),
        ],
        None => vec![Line::from(Span::styled("No player source", Theme::dimmed()))],
    };

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner_frame(0), "⠋");
        assert_eq!(spinner_frame(10), "⠋");
        assert_eq!(spinner_frame(13), "⠸");
    }
}
