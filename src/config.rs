//! Configuration management for cinegrid
//!
//! Handles config file loading and endpoint overrides.
//! Config is stored at ~/.config/cinegrid/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{BASE_URL, IMAGE_FALLBACK};

/// Environment variable that overrides the catalog endpoint
pub const BASE_URL_ENV: &str = "CINEGRID_BASE_URL";

/// Quiet period before a search fires
pub const DEFAULT_DEBOUNCE_MS: u64 = 600;

/// Categories offered as tabs when the config names none
const DEFAULT_CATEGORIES: &[&str] = &[
    "trending",
    "indonesian-movies",
    "indonesian-drama",
    "kdrama",
    "anime",
];

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Catalog endpoint
    pub base_url: Option<String>,
    /// Poster shown for items without one
    pub image_fallback: Option<String>,
    /// Category actions shown as tabs, in order
    pub categories: Option<Vec<String>>,
    /// Search debounce in milliseconds
    pub search_debounce_ms: Option<u64>,
    /// Per-request timeout; unset means requests may hang
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Get config file path (~/.config/cinegrid/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cinegrid").join("config.toml"))
    }

    /// Load config from the default file, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load config from a specific file, or return default if unreadable
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(s) => toml::from_str(&s).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Catalog endpoint with fallback chain:
    /// 1. Environment variable CINEGRID_BASE_URL
    /// 2. Config file
    /// 3. Built-in default
    pub fn base_url(&self) -> String {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.is_empty() {
                return url;
            }
        }
        self.base_url.clone().unwrap_or_else(|| BASE_URL.to_string())
    }

    pub fn image_fallback(&self) -> String {
        self.image_fallback
            .clone()
            .unwrap_or_else(|| IMAGE_FALLBACK.to_string())
    }

    /// Configured categories; `trending` is always present and first
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = match &self.categories {
            Some(list) if !list.is_empty() => list.clone(),
            _ => DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        };
        categories.retain(|c| c != crate::models::TRENDING);
        categories.insert(0, crate::models::TRENDING.to_string());
        categories
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.base_url.is_none());
        assert_eq!(config.image_fallback(), IMAGE_FALLBACK);
        assert_eq!(config.search_debounce(), Duration::from_millis(600));
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_default_categories_start_with_trending() {
        let config = Config::default();
        let categories = config.categories();
        assert_eq!(categories[0], "trending");
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());
    }

    #[test]
    fn test_custom_categories_keep_trending_first() {
        let config = Config {
            categories: Some(vec!["anime".into(), "trending".into(), "kdrama".into()]),
            ..Default::default()
        };
        assert_eq!(config.categories(), vec!["trending", "anime", "kdrama"]);
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
            base_url = "http://localhost:8080/api.php"
            categories = ["anime"]
            search_debounce_ms = 250
            request_timeout_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/api.php"));
        assert_eq!(config.search_debounce(), Duration::from_millis(250));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.categories(), vec!["trending", "anime"]);
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let config = Config::load_from(Path::new("/nonexistent/cinegrid/config.toml"));
        assert!(config.categories.is_none());
    }
}
