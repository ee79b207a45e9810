//! cinegrid - terminal browser for a movie and series catalog
//!
//! Browse trending titles and categories, search with a debounced input,
//! and open a detail view with a player link and episode picker.
//!
//! # Modules
//!
//! - `models` - Catalog items, detail records, view state
//! - `api` - Catalog HTTP client
//! - `app` - Application state and key handling
//! - `action` - Tasks sent to the worker and results sent back
//! - `worker` - Runs network I/O and the search debounce
//! - `ui` - TUI renderers
//! - `cli` / `commands` - Scriptable subcommands

pub mod action;
pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod event;
pub mod models;
pub mod tui;
pub mod ui;
pub mod worker;

// Re-export commonly used types
pub use models::{CatalogItem, ContentDetail, EpisodeLink, Season, ViewState};

pub use action::{Action, Task};
pub use api::{CatalogClient, CatalogError};
pub use app::App;
pub use config::Config;
pub use worker::Worker;
