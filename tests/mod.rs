//! Integration tests for cinegrid
//!
//! Tests are organized by component:
//! - catalog_test: Catalog API client (listings, search, detail, failures)
//! - cli_test: CLI command handlers and exit codes
//! - ui_test: Renderers against a TestBackend
//! - e2e_test: App + Worker flows (startup, debounced search, detail modal)

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
