//! Hero banner for the first trending item

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::models::CatalogItem;
use crate::ui::{sanitize, Theme};

/// Rows taken by the banner when a hero is present
pub const HERO_HEIGHT: u16 = 8;

/// Call to action label
pub const CTA_LABEL: &str = "▶ Tonton Sekarang";

/// Draw the banner; draws nothing without a hero
pub fn render_hero(frame: &mut Frame, area: Rect, hero: Option<&CatalogItem>, focused: bool) {
    let Some(item) = hero else {
        return;
    };
    if area.height == 0 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .style(Style::default().bg(Theme::BACKGROUND_LIGHT));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut meta = Vec::new();
    if !item.year_str().is_empty() {
        meta.push(Span::styled(sanitize(item.year_str()), Theme::secondary()));
        meta.push(Span::raw("  "));
    }
    if !item.rating_str().is_empty() {
        meta.push(Span::styled(format!("★ {}", sanitize(item.rating_str())), Theme::accent()));
        meta.push(Span::raw("  "));
    }
    let kind = item.kind_upper();
    if !kind.is_empty() {
        meta.push(Span::styled(format!(" {} ", sanitize(&kind)), Theme::badge()));
    }

    let cta_style = if focused {
        Theme::highlighted()
    } else {
        Theme::button()
    };
    let mut cta = vec![Span::styled(format!(" {} ", CTA_LABEL), cta_style)];
    if focused {
        cta.push(Span::styled("  Enter", Theme::keybind()));
    }

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" TRENDING ", Theme::highlighted()),
            Span::raw(" "),
            Span::styled(sanitize(&item.title), Theme::title()),
        ]),
        Line::from(meta),
    ];
    if let Some(poster) = item.poster.as_deref().filter(|p| !p.is_empty()) {
        lines.push(Line::from(Span::styled(
            format!("Poster: {}", sanitize(poster)),
            Theme::dimmed(),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(cta));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}
