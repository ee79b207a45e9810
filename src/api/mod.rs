//! API client for the content catalog
//!
//! - Catalog: category listings, search and item detail over one endpoint

pub mod catalog;

pub use catalog::{CatalogClient, CatalogError, CatalogQuery, BASE_URL, IMAGE_FALLBACK};
