//! Messages between the view state and the background worker
//!
//! `Task`s flow out of `App` handlers and describe I/O to perform.
//! `Action`s flow back in with the results.

use crate::models::{CatalogItem, ContentDetail};

/// Which request filled the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridSource {
    Category(String),
    Search(String),
}

/// Work requested by the view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    LoadCategory {
        action: String,
        page: u32,
        load_id: u64,
    },
    Search {
        query: String,
        load_id: u64,
    },
    LoadDetail {
        detail_path: String,
        load_id: u64,
    },
    /// Restart the search quiet period with the current input text
    DebounceSearch(String),
    /// Hand a URL to the system opener
    OpenExternal(String),
}

/// Results delivered back to the view state
#[derive(Debug, Clone)]
pub enum Action {
    ItemsLoaded {
        source: GridSource,
        items: Vec<CatalogItem>,
        load_id: u64,
    },
    DetailLoaded {
        result: Result<ContentDetail, String>,
        load_id: u64,
    },
    /// Search input has been quiet for the debounce period
    SearchSettled(String),
    Error(String),
}
