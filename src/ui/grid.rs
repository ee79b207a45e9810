//! Tiled content grid and its loading skeleton

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::models::CatalogItem;
use crate::ui::{sanitize, truncate, Theme};

/// Columns taken by one tile, including the gap
pub const TILE_WIDTH: u16 = 24;

/// Rows taken by one tile
pub const TILE_HEIGHT: u16 = 6;

/// Placeholder tiles shown while a listing loads
pub const SKELETON_TILES: usize = 10;

/// Tiles per row at a given width
pub fn columns_for(width: u16) -> usize {
    (width / TILE_WIDTH).max(1) as usize
}

/// Display model of one tile, already sanitized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub poster: String,
    pub year: String,
    pub rating: String,
    pub kind: String,
}

/// Build the tile model for an item; a missing poster becomes `fallback`
pub fn card(item: &CatalogItem, fallback: &str) -> Card {
    Card {
        title: sanitize(&item.title),
        poster: sanitize(item.poster_or(fallback)),
        year: sanitize(item.year_str()),
        rating: sanitize(item.rating_str()),
        kind: sanitize(&item.kind_upper()),
    }
}

/// Tile positions for `count` tiles, scrolled so `focus_row` is visible.
/// Only tiles that fit completely are returned.
fn layout_tiles(area: Rect, count: usize, focus_row: usize) -> Vec<(usize, Rect)> {
    let columns = columns_for(area.width);
    let visible_rows = ((area.height / TILE_HEIGHT) as usize).max(1);
    let first_row = (focus_row + 1).saturating_sub(visible_rows);

    (first_row * columns..count)
        .map_while(|index| {
            let row = index / columns - first_row;
            let col = index % columns;
            let y = area.y + row as u16 * TILE_HEIGHT;
            if y + TILE_HEIGHT > area.bottom() {
                return None;
            }
            let rect = Rect {
                x: area.x + col as u16 * TILE_WIDTH,
                y,
                width: TILE_WIDTH.saturating_sub(1).min(area.width),
                height: TILE_HEIGHT,
            };
            Some((index, rect))
        })
        .collect()
}

/// Draw one tile per item; `selected` is the hovered tile, if the grid has focus
pub fn render_grid(
    frame: &mut Frame,
    area: Rect,
    items: &[CatalogItem],
    selected: Option<usize>,
    fallback: &str,
) {
    let focus_row = selected.unwrap_or(0) / columns_for(area.width);

    for (index, rect) in layout_tiles(area, items.len(), focus_row) {
        let card = card(&items[index], fallback);
        render_tile(frame, rect, &card, selected == Some(index));
    }
}

fn render_tile(frame: &mut Frame, area: Rect, card: &Card, hovered: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if hovered {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .style(Theme::tile());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let mut lines = vec![
        if card.kind.is_empty() {
            Line::from("")
        } else {
            Line::from(Span::styled(format!(" {} ", card.kind), Theme::badge()))
        },
        Line::from(Span::styled(truncate(&card.title, width), Theme::title())),
        Line::from(Span::styled(truncate(&card.poster, width), Theme::dimmed())),
    ];

    // Hover reveals the metadata
    if hovered {
        let mut meta = Vec::new();
        if !card.year.is_empty() {
            meta.push(Span::styled(card.year.clone(), Theme::secondary()));
            meta.push(Span::raw(" "));
        }
        if !card.rating.is_empty() {
            meta.push(Span::styled(format!("★ {}", card.rating), Theme::accent()));
        }
        lines.push(Line::from(meta));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Draw `SKELETON_TILES` placeholders
pub fn render_skeleton(frame: &mut Frame, area: Rect) {
    for (_, rect) in layout_tiles(area, SKELETON_TILES, 0) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border())
            .style(Theme::skeleton());
        frame.render_widget(block, rect);
    }
}
