//! App state and core application logic
//!
//! Owns the view state for one session: the browse grid, hero banner,
//! search input and detail modal. Handlers mutate state and return the
//! `Task` (if any) the worker should run; results come back through
//! `App::update`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::{Action, GridSource, Task};
use crate::config::Config;
use crate::event::Event;
use crate::models::{self, CatalogItem, ContentDetail, ViewState, TRENDING};
use crate::ui::grid;

/// Minimum query length that triggers a search
pub const MIN_SEARCH_LEN: usize = 3;

// =============================================================================
// Input Mode / Focus
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

/// Which part of the browse page has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Hero banner call to action
    Hero,
    #[default]
    Grid,
}

// =============================================================================
// Grid State
// =============================================================================

/// What the grid currently holds
#[derive(Debug, Clone, PartialEq)]
pub enum GridContent {
    /// Skeleton tiles while a listing is in flight
    Loading,
    Items(Vec<CatalogItem>),
}

/// Tiled listing with a 2D cursor
#[derive(Debug, Clone)]
pub struct GridState {
    pub content: GridContent,
    /// Index of the hovered tile
    pub selected: usize,
    /// Tiles per row at the current terminal width
    pub columns: usize,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            content: GridContent::Items(Vec::new()),
            selected: 0,
            columns: 1,
        }
    }
}

impl GridState {
    pub fn items(&self) -> &[CatalogItem] {
        match &self.content {
            GridContent::Items(items) => items,
            GridContent::Loading => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.content, GridContent::Loading)
    }

    pub fn set_loading(&mut self) {
        self.content = GridContent::Loading;
        self.selected = 0;
    }

    /// Replace the listing wholesale
    pub fn set_items(&mut self, items: Vec<CatalogItem>) {
        self.content = GridContent::Items(items);
        self.selected = 0;
    }

    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    pub fn current(&self) -> Option<&CatalogItem> {
        self.items().get(self.selected)
    }

    /// Row of the hovered tile
    pub fn row(&self) -> usize {
        self.selected / self.columns
    }

    pub fn left(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.selected + 1 < self.len() {
            self.selected += 1;
        }
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(self.columns);
    }

    pub fn down(&mut self) {
        let target = self.selected + self.columns;
        if target < self.len() {
            self.selected = target;
        } else if self.row() < self.len().saturating_sub(1) / self.columns {
            // Partial last row: land on its final tile
            self.selected = self.len() - 1;
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.len().saturating_sub(1);
    }
}

// =============================================================================
// Search State
// =============================================================================

/// Search box contents
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Search query
    pub query: String,
    /// Cursor position in characters
    pub cursor: usize,
}

impl SearchState {
    fn byte_index(&self, char_idx: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.query.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor; false when nothing changed
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.query.remove(idx);
        true
    }

    /// Delete character at cursor; false when nothing changed
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let idx = self.byte_index(self.cursor);
        self.query.remove(idx);
        true
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Clear query; false when it was already empty
    pub fn clear(&mut self) -> bool {
        let changed = !self.query.is_empty();
        self.query.clear();
        self.cursor = 0;
        changed
    }

    /// Text before and after the cursor, for drawing the caret
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.query.split_at(self.byte_index(self.cursor))
    }
}

// =============================================================================
// Detail Modal
// =============================================================================

/// Focus areas inside the detail modal
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DetailFocus {
    #[default]
    Info,
    Player,
    Episodes,
}

/// A loaded detail record plus the modal's own cursor state
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub detail: ContentDetail,
    /// Source currently loaded in the player panel
    pub player_url: Option<String>,
    pub focus: DetailFocus,
    /// Flat index into the episodes of all seasons
    pub selected_episode: usize,
    /// Scroll offset for the info text
    pub scroll: u16,
}

impl DetailView {
    pub fn new(detail: ContentDetail) -> Self {
        let player_url = detail.player_url.clone().filter(|u| !u.is_empty());
        Self {
            detail,
            player_url,
            focus: DetailFocus::Info,
            selected_episode: 0,
            scroll: 0,
        }
    }

    pub fn has_episodes(&self) -> bool {
        self.detail.episode_count() > 0
    }

    /// Cycle to next focus area, skipping episodes when there are none
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            DetailFocus::Info => DetailFocus::Player,
            DetailFocus::Player if self.has_episodes() => DetailFocus::Episodes,
            DetailFocus::Player | DetailFocus::Episodes => DetailFocus::Info,
        };
    }

    /// Cycle to previous focus area
    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            DetailFocus::Info if self.has_episodes() => DetailFocus::Episodes,
            DetailFocus::Info => DetailFocus::Player,
            DetailFocus::Player => DetailFocus::Info,
            DetailFocus::Episodes => DetailFocus::Player,
        };
    }

    pub fn up(&mut self) {
        match self.focus {
            DetailFocus::Info => self.scroll = self.scroll.saturating_sub(1),
            DetailFocus::Episodes => {
                self.selected_episode = self.selected_episode.saturating_sub(1)
            }
            DetailFocus::Player => {}
        }
    }

    pub fn down(&mut self) {
        match self.focus {
            DetailFocus::Info => self.scroll = self.scroll.saturating_add(1),
            DetailFocus::Episodes => {
                if self.selected_episode + 1 < self.detail.episode_count() {
                    self.selected_episode += 1;
                }
            }
            DetailFocus::Player => {}
        }
    }

    /// Point the player at a new source and bring it into view
    pub fn update_player(&mut self, url: impl Into<String>) {
        self.player_url = Some(url.into());
        self.focus = DetailFocus::Player;
    }

    /// Load the selected episode into the player
    pub fn activate_episode(&mut self) -> bool {
        let Some(url) = self
            .detail
            .episode_at(self.selected_episode)
            .map(|ep| ep.url.clone())
        else {
            return false;
        };
        self.update_player(url);
        true
    }
}

/// Detail modal lifecycle: closed → loading → shown, any → closed
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Modal {
    #[default]
    Closed,
    /// Spinner while the detail request is in flight
    Loading { detail_path: String },
    Shown(Box<DetailView>),
    /// Detail request failed; modal stays open with an apology
    Failed,
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    pub focus: Focus,
    pub view: ViewState,
    pub section_title: String,
    pub hero: Option<CatalogItem>,
    pub grid: GridState,
    pub search: SearchState,
    pub modal: Modal,
    /// Page navigation is frozen while the modal is open
    pub scroll_locked: bool,
    /// Category actions offered as tabs
    pub categories: Vec<String>,
    pub image_fallback: String,
    /// Spinner animation frame
    pub tick: usize,
    /// Transient message shown in the status bar
    pub error: Option<String>,
    grid_load_id: u64,
    detail_load_id: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            focus: Focus::Grid,
            view: ViewState::default(),
            section_title: models::section_title(TRENDING),
            hero: None,
            grid: GridState::default(),
            search: SearchState::default(),
            modal: Modal::Closed,
            scroll_locked: false,
            categories: config.categories(),
            image_fallback: config.image_fallback(),
            tick: 0,
            error: None,
            grid_load_id: 0,
            detail_load_id: 0,
        }
    }

    /// First load of the session
    pub fn init(&mut self) -> Task {
        self.fetch_category(TRENDING)
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Fit the grid to the terminal width
    pub fn set_viewport(&mut self, width: u16) {
        self.grid.set_columns(grid::columns_for(width));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    // -------------------------------------------------------------------------
    // Loaders
    // -------------------------------------------------------------------------

    /// Switch to a category listing; the grid shows skeletons until it lands
    pub fn fetch_category(&mut self, action: &str) -> Task {
        self.view.current_action = action.to_string();
        self.view.current_page = 1;
        self.view.is_searching = false;
        self.grid.set_loading();
        self.grid_load_id += 1;
        tracing::info!(action, "loading category");
        Task::LoadCategory {
            action: action.to_string(),
            page: self.view.current_page,
            load_id: self.grid_load_id,
        }
    }

    /// Search the catalog for a literal query
    pub fn search_content(&mut self, query: &str) -> Task {
        self.view.is_searching = true;
        self.grid.set_loading();
        self.grid_load_id += 1;
        tracing::info!(query, "searching");
        Task::Search {
            query: query.to_string(),
            load_id: self.grid_load_id,
        }
    }

    /// Re-issue whatever filled the grid last
    pub fn refresh(&mut self) -> Task {
        if self.view.is_searching && self.search.query.chars().count() >= MIN_SEARCH_LEN {
            let query = self.search.query.clone();
            self.search_content(&query)
        } else {
            let action = self.view.current_action.clone();
            self.fetch_category(&action)
        }
    }

    /// Category tab index of the current action
    pub fn category_index(&self) -> Option<usize> {
        self.categories
            .iter()
            .position(|c| *c == self.view.current_action)
    }

    fn cycle_category(&mut self, forward: bool) -> Option<Task> {
        let len = self.categories.len();
        if len == 0 {
            return None;
        }
        let idx = match (self.category_index(), forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, _) => 0,
        };
        let action = self.categories[idx].clone();
        Some(self.fetch_category(&action))
    }

    // -------------------------------------------------------------------------
    // Detail Modal
    // -------------------------------------------------------------------------

    /// Open the modal for an item; spinner until the detail arrives
    pub fn show_detail(&mut self, detail_path: &str) -> Task {
        self.modal = Modal::Loading {
            detail_path: detail_path.to_string(),
        };
        self.scroll_locked = true;
        self.detail_load_id += 1;
        tracing::info!(detail_path, "opening detail");
        Task::LoadDetail {
            detail_path: detail_path.to_string(),
            load_id: self.detail_load_id,
        }
    }

    /// Hide the modal, unlock the page and drop its contents
    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
        self.scroll_locked = false;
        // Anything still in flight for the old modal is now stale
        self.detail_load_id += 1;
    }

    pub fn detail_view(&self) -> Option<&DetailView> {
        match &self.modal {
            Modal::Shown(view) => Some(view.as_ref()),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Async Results
    // -------------------------------------------------------------------------

    /// Apply a worker result; may chain another task
    pub fn update(&mut self, action: Action) -> Option<Task> {
        match action {
            Action::ItemsLoaded {
                source,
                items,
                load_id,
            } => {
                if load_id != self.grid_load_id {
                    tracing::debug!(load_id, current = self.grid_load_id, "dropping stale listing");
                    return None;
                }
                match source {
                    GridSource::Category(action) => {
                        self.section_title = models::section_title(&action);
                        if action == TRENDING {
                            if let Some(first) = items.first() {
                                self.hero = Some(first.clone());
                            }
                        }
                    }
                    GridSource::Search(query) => {
                        self.section_title = models::search_title(&query);
                    }
                }
                self.grid.set_items(items);
                if self.hero.is_none() {
                    self.focus = Focus::Grid;
                }
                None
            }
            Action::DetailLoaded { result, load_id } => {
                if load_id != self.detail_load_id || !self.modal.is_open() {
                    tracing::debug!(load_id, "dropping stale detail");
                    return None;
                }
                self.modal = match result {
                    Ok(detail) => Modal::Shown(Box::new(DetailView::new(detail))),
                    Err(_) => Modal::Failed,
                };
                None
            }
            Action::SearchSettled(_) => {
                // The input's value when the timer fires decides
                let query = self.search.query.clone();
                match query.chars().count() {
                    0 => Some(self.fetch_category(TRENDING)),
                    n if n >= MIN_SEARCH_LEN => Some(self.search_content(&query)),
                    _ => None,
                }
            }
            Action::Error(msg) => {
                self.set_error(msg);
                None
            }
        }
    }

    // -------------------------------------------------------------------------
    // Terminal Events
    // -------------------------------------------------------------------------

    pub fn handle_event(&mut self, event: Event) -> Option<Task> {
        match event {
            Event::Tick => {
                self.tick = self.tick.wrapping_add(1);
                None
            }
            Event::Key(key) => self.handle_key(key),
            Event::Resize(width, _) => {
                self.set_viewport(width);
                None
            }
            Event::Render => None,
        }
    }

    /// Handle keyboard event, returning the task it triggers
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Task> {
        // Clear error on any keypress
        self.error = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }

        if self.modal.is_open() {
            return self.handle_modal_key(key);
        }

        match self.input_mode {
            InputMode::Editing => self.handle_editing_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Task> {
        let changed = match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                false
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.clear()
            }
            KeyCode::Char(c) => {
                self.search.insert(c);
                true
            }
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Delete => self.search.delete(),
            KeyCode::Left => {
                self.search.cursor_left();
                false
            }
            KeyCode::Right => {
                self.search.cursor_right();
                false
            }
            KeyCode::Home => {
                self.search.cursor_home();
                false
            }
            KeyCode::End => {
                self.search.cursor_end();
                false
            }
            _ => false,
        };

        // Every change to the text restarts the quiet period
        changed.then(|| Task::DebounceSearch(self.search.query.clone()))
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<Task> {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                None
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.input_mode = InputMode::Editing;
                self.search.cursor_end();
                None
            }
            KeyCode::Char('r') => Some(self.refresh()),
            KeyCode::Char(c @ '1'..='9') => {
                let idx = (c as usize) - ('1' as usize);
                let action = self.categories.get(idx)?.clone();
                Some(self.fetch_category(&action))
            }
            KeyCode::Char(']') | KeyCode::Tab => self.cycle_category(true),
            KeyCode::Char('[') | KeyCode::BackTab => self.cycle_category(false),
            KeyCode::Enter => self.open_focused(),
            _ => {
                self.navigate(key.code);
                None
            }
        }
    }

    fn open_focused(&mut self) -> Option<Task> {
        let detail_path = match self.focus {
            Focus::Hero => self.hero.as_ref()?.detail_path.clone(),
            Focus::Grid => self.grid.current()?.detail_path.clone(),
        };
        Some(self.show_detail(&detail_path))
    }

    fn navigate(&mut self, code: KeyCode) {
        if self.scroll_locked {
            return;
        }
        match (self.focus, code) {
            (Focus::Hero, KeyCode::Down | KeyCode::Char('j')) => self.focus = Focus::Grid,
            (Focus::Hero, _) => {}
            (Focus::Grid, KeyCode::Up | KeyCode::Char('k')) => {
                if self.grid.row() == 0 && self.hero.is_some() {
                    self.focus = Focus::Hero;
                } else {
                    self.grid.up();
                }
            }
            (Focus::Grid, KeyCode::Down | KeyCode::Char('j')) => self.grid.down(),
            (Focus::Grid, KeyCode::Left | KeyCode::Char('h')) => self.grid.left(),
            (Focus::Grid, KeyCode::Right | KeyCode::Char('l')) => self.grid.right(),
            (Focus::Grid, KeyCode::Home | KeyCode::Char('g')) => self.grid.first(),
            (Focus::Grid, KeyCode::End | KeyCode::Char('G')) => self.grid.last(),
            _ => {}
        }
    }

    /// Keys while the detail modal is open; the page underneath is locked
    fn handle_modal_key(&mut self, key: KeyEvent) -> Option<Task> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => {
                self.close_modal();
                return None;
            }
            _ => {}
        }

        let Modal::Shown(view) = &mut self.modal else {
            return None;
        };

        match key.code {
            KeyCode::Tab => view.focus_next(),
            KeyCode::BackTab => view.focus_prev(),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Left | KeyCode::Char('h') => view.up(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Right | KeyCode::Char('l') => {
                view.down()
            }
            KeyCode::Enter => match view.focus {
                DetailFocus::Episodes => {
                    view.activate_episode();
                }
                DetailFocus::Player => {
                    return view.player_url.clone().map(Task::OpenExternal);
                }
                DetailFocus::Info => {}
            },
            KeyCode::Char('o') => return view.player_url.clone().map(Task::OpenExternal),
            _ => {}
        }
        None
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
