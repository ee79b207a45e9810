//! Episode picker: one labelled section per season, one button per episode

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{DetailFocus, DetailView};
use crate::models::Season;
use crate::ui::{sanitize, truncate, Theme};

/// Buttons per row
pub const BUTTONS_PER_ROW: usize = 4;

const BUTTON_LABEL_MAX: usize = 14;

/// Lines for every season plus the line index holding the selected button.
///
/// `selected` is a flat index over all episodes; `current_url` marks the
/// episode loaded in the player.
pub fn episode_lines(
    seasons: &[Season],
    selected: Option<usize>,
    current_url: Option<&str>,
) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let mut selected_line = 0;
    let mut flat = 0;

    for season in seasons {
        lines.push(Line::from(Span::styled(
            sanitize(&season.season_name),
            Theme::accent(),
        )));

        for row in season.episodes.chunks(BUTTONS_PER_ROW) {
            let mut spans = Vec::with_capacity(row.len() * 2);
            for episode in row {
                let is_selected = selected == Some(flat);
                let is_playing = current_url.is_some_and(|u| u == episode.url);
                if is_selected {
                    selected_line = lines.len();
                }

                let marker = if is_playing { "▶ " } else { "" };
                let label = format!(
                    " {}{} ",
                    marker,
                    truncate(&sanitize(&episode.episode_name), BUTTON_LABEL_MAX)
                );
                let style = if is_selected {
                    Theme::highlighted()
                } else if is_playing {
                    Theme::button().fg(Theme::ACCENT)
                } else {
                    Theme::button()
                };
                spans.push(Span::styled(label, style));
                spans.push(Span::raw(" "));
                flat += 1;
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
    }

    (lines, selected_line)
}

/// Scroll offset that keeps `line` inside a window of `height` rows
pub fn scroll_for(line: usize, height: u16) -> u16 {
    let height = height.max(1) as usize;
    line.saturating_sub(height - 1) as u16
}

pub fn render_episodes(frame: &mut Frame, area: Rect, view: &DetailView) {
    let Some(seasons) = view.detail.seasons() else {
        return;
    };
    let focused = view.focus == DetailFocus::Episodes;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(
            format!(" EPISODES ({}) ", view.detail.episode_count()),
            Theme::title(),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let selected = focused.then_some(view.selected_episode);
    let (lines, selected_line) =
        episode_lines(seasons, selected, view.player_url.as_deref());
    let scroll = scroll_for(selected_line, inner.height);

    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EpisodeLink;

    fn season(name: &str, count: usize) -> Season {
        Season {
            season_name: name.into(),
            episodes: (1..=count)
                .map(|i| EpisodeLink {
                    episode_name: format!("Ep {}", i),
                    url: format!("https://p/{}/{}", name, i),
                })
                .collect(),
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_sections_and_button_rows() {
        let seasons = vec![season("S1", 5), season("S2", 2)];
        let (lines, _) = episode_lines(&seasons, None, None);

        // S1 header, 2 rows, blank, S2 header, 1 row, blank
        assert_eq!(lines.len(), 7);
        assert_eq!(text(&lines[0]), "S1");
        assert!(text(&lines[1]).contains("Ep 4"));
        assert!(text(&lines[2]).contains("Ep 5"));
        assert_eq!(text(&lines[4]), "S2");
    }

    #[test]
    fn test_selected_line_follows_flat_index() {
        let seasons = vec![season("S1", 5), season("S2", 2)];
        let (_, line) = episode_lines(&seasons, Some(4), None);
        assert_eq!(line, 2);
        let (_, line) = episode_lines(&seasons, Some(6), None);
        assert_eq!(line, 5);
    }

    #[test]
    fn test_playing_episode_is_marked() {
        let seasons = vec![season("S1", 2)];
        let (lines, _) = episode_lines(&seasons, None, Some("https://p/S1/2"));
        let row = text(&lines[1]);
        assert!(row.contains("▶ Ep 2"));
        assert!(!row.contains("▶ Ep 1"));
    }

    #[test]
    fn test_scroll_for() {
        assert_eq!(scroll_for(0, 5), 0);
        assert_eq!(scroll_for(4, 5), 0);
        assert_eq!(scroll_for(7, 5), 3);
        assert_eq!(scroll_for(3, 0), 3);
    }
}
