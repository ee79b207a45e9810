//! Data structures and types for cinegrid
//!
//! Contains the shared models used across the application:
//! - **Catalog**: summary items shown in the grid and hero banner
//! - **Detail**: the extended record behind a single item, with seasons
//! - **View**: the small view-state record mutated by user actions

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Literal shown in place of a missing description
pub const DESCRIPTION_PLACEHOLDER: &str = "Tidak ada deskripsi tersedia.";

/// Category action that also drives the hero banner
pub const TRENDING: &str = "trending";

// =============================================================================
// Catalog Models
// =============================================================================

/// Summary of a catalog entry as returned by category and search listings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub poster: Option<String>,
    /// Shown verbatim; the API sends either a number or a string
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rating: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub detail_path: String,
}

impl CatalogItem {
    /// Poster URL, or `fallback` when the item has none
    pub fn poster_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_empty(self.poster.as_deref()).unwrap_or(fallback)
    }

    /// Year as displayed (empty when unknown)
    pub fn year_str(&self) -> &str {
        self.year.as_deref().unwrap_or_default()
    }

    /// Rating as displayed (empty when unknown)
    pub fn rating_str(&self) -> &str {
        self.rating.as_deref().unwrap_or_default()
    }

    /// Content type in upper case, e.g. `MOVIE`
    pub fn kind_upper(&self) -> String {
        self.kind.as_deref().unwrap_or_default().to_uppercase()
    }
}

impl fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if let Some(year) = non_empty(self.year.as_deref()) {
            write!(f, " ({})", year)?;
        }
        if let Some(kind) = non_empty(self.kind.as_deref()) {
            write!(f, " [{}]", kind.to_uppercase())?;
        }
        if let Some(rating) = non_empty(self.rating.as_deref()) {
            write!(f, " ★ {}", rating)?;
        }
        Ok(())
    }
}

/// Envelope for category and search listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub success: bool,
    /// Entries that are not objects are skipped one by one
    #[serde(default, deserialize_with = "lenient_vec")]
    pub items: Vec<CatalogItem>,
}

// =============================================================================
// Detail Models
// =============================================================================

/// A playable episode inside a season
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeLink {
    #[serde(default, deserialize_with = "text")]
    pub episode_name: String,
    #[serde(default, deserialize_with = "text")]
    pub url: String,
}

impl fmt::Display for EpisodeLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.episode_name)
    }
}

/// A named season with its ordered episodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    #[serde(default, deserialize_with = "text")]
    pub season_name: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub episodes: Vec<EpisodeLink>,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} episodes)", self.season_name, self.episodes.len())
    }
}

/// Extended record for one catalog entry, loaded on demand
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetail {
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub poster: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rating: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub player_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_seasons")]
    pub seasons: Option<Vec<Season>>,
}

impl ContentDetail {
    /// Description, or the literal placeholder when absent
    pub fn description_or_placeholder(&self) -> &str {
        non_empty(self.description.as_deref()).unwrap_or(DESCRIPTION_PLACEHOLDER)
    }

    /// Seasons when present and non-empty
    pub fn seasons(&self) -> Option<&[Season]> {
        self.seasons.as_deref().filter(|s| !s.is_empty())
    }

    /// Total episode count across all seasons
    pub fn episode_count(&self) -> usize {
        self.seasons()
            .map(|s| s.iter().map(|season| season.episodes.len()).sum())
            .unwrap_or(0)
    }

    /// Episode at a flat index (seasons laid end to end)
    pub fn episode_at(&self, index: usize) -> Option<&EpisodeLink> {
        self.seasons()?
            .iter()
            .flat_map(|s| s.episodes.iter())
            .nth(index)
    }
}

impl fmt::Display for ContentDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if let Some(year) = non_empty(self.year.as_deref()) {
            write!(f, " ({})", year)?;
        }
        if let Some(rating) = non_empty(self.rating.as_deref()) {
            write!(f, " - ★ {}", rating)?;
        }
        if let Some(seasons) = self.seasons() {
            write!(f, " - {} seasons", seasons.len())?;
        }
        Ok(())
    }
}

/// Envelope for the detail endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailResponse {
    #[serde(default)]
    pub item: Option<ContentDetail>,
}

// =============================================================================
// View State
// =============================================================================

/// What the browser is currently showing, independent of the data itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Last category action requested
    pub current_action: String,
    /// Listing page; pagination is fixed to the first page
    pub current_page: u32,
    /// True while the grid shows search results rather than a category
    pub is_searching: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current_action: TRENDING.to_string(),
            current_page: 1,
            is_searching: false,
        }
    }
}

/// Section heading for a category action: first `-` becomes a space, upper-cased
pub fn section_title(action: &str) -> String {
    action.replacen('-', " ", 1).to_uppercase()
}

/// Section heading for a search query
pub fn search_title(query: &str) -> String {
    format!("Hasil pencarian: \"{}\"", query)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Accept a JSON string or number and keep its textual form
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Like [`lenient_string`], with `null` and other shapes read as empty text
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(deserializer).map(Option::unwrap_or_default)
}

/// Decode each array element on its own, dropping the ones that do not fit
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(values)) = value else {
        return Ok(Vec::new());
    };
    Ok(values
        .into_iter()
        .filter_map(|v| match serde_json::from_value(v) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed entry");
                None
            }
        })
        .collect())
}

fn lenient_seasons<'de, D>(deserializer: D) -> Result<Option<Vec<Season>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        Some(v @ Value::Array(_)) => lenient_vec(v).map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_item_parses_numbers_and_strings() {
        let json = r#"{"title":"A","year":2020,"rating":8,"type":"movie","poster":"x.jpg","detailPath":"a"}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.title, "A");
        assert_eq!(item.year_str(), "2020");
        assert_eq!(item.rating_str(), "8");
        assert_eq!(item.kind_upper(), "MOVIE");
        assert_eq!(item.detail_path, "a");

        let json = r#"{"title":"B","year":"2019","rating":"7.5","detailPath":"b"}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.year_str(), "2019");
        assert_eq!(item.rating_str(), "7.5");
        assert_eq!(item.kind_upper(), "");
    }

    #[test]
    fn test_fractional_rating_is_kept() {
        let item: CatalogItem = serde_json::from_str(r#"{"rating":8.5}"#).unwrap();
        assert_eq!(item.rating_str(), "8.5");
    }

    #[test]
    fn test_null_fields_become_none() {
        let item: CatalogItem =
            serde_json::from_str(r#"{"title":"C","year":null,"poster":null}"#).unwrap();
        assert!(item.year.is_none());
        assert!(item.poster.is_none());
        assert_eq!(item.detail_path, "");
    }

    #[test]
    fn test_null_and_numeric_text_fields() {
        let item: CatalogItem =
            serde_json::from_str(r#"{"title":null,"detailPath":12345,"type":7}"#).unwrap();
        assert_eq!(item.title, "");
        assert_eq!(item.detail_path, "12345");
        assert_eq!(item.kind_upper(), "7");
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let json = r#"{"success":true,"items":[null,{"title":"A"},"junk",{"title":{"x":1}}]}"#;
        let resp: CatalogResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.items.len(), 2);
        assert_eq!(resp.items[0].title, "A");
        assert_eq!(resp.items[1].title, "");

        let resp: CatalogResponse =
            serde_json::from_str(r#"{"success":true,"items":null}"#).unwrap();
        assert!(resp.items.is_empty());
    }

    #[test]
    fn test_detail_tolerates_odd_seasons() {
        let json = r#"{"item":{"title":"S","seasons":[
            {"seasonName":1,"episodes":[{"episodeName":null,"url":"u"},42]},
            "junk"
        ]}}"#;
        let detail = serde_json::from_str::<DetailResponse>(json)
            .unwrap()
            .item
            .unwrap();
        let seasons = detail.seasons().unwrap();
        assert_eq!(seasons.len(), 1);
        assert_eq!(seasons[0].season_name, "1");
        assert_eq!(detail.episode_count(), 1);
        assert_eq!(detail.episode_at(0).unwrap().url, "u");

        let detail: ContentDetail = serde_json::from_str(r#"{"seasons":null}"#).unwrap();
        assert!(detail.seasons.is_none());
    }

    #[test]
    fn test_poster_fallback() {
        let mut item = CatalogItem {
            poster: None,
            ..Default::default()
        };
        assert_eq!(item.poster_or("fallback.png"), "fallback.png");

        item.poster = Some(String::new());
        assert_eq!(item.poster_or("fallback.png"), "fallback.png");

        item.poster = Some("x.jpg".into());
        assert_eq!(item.poster_or("fallback.png"), "x.jpg");
    }

    #[test]
    fn test_catalog_response_defaults() {
        let resp: CatalogResponse = serde_json::from_str("{}").unwrap();
        assert!(!resp.success);
        assert!(resp.items.is_empty());

        let resp: CatalogResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(resp.success);
        assert!(resp.items.is_empty());
    }

    #[test]
    fn test_detail_parses_seasons() {
        let json = r#"{
            "item": {
                "title": "Show",
                "rating": 9.1,
                "year": 2021,
                "type": "tv",
                "description": "",
                "playerUrl": "https://player/1",
                "seasons": [
                    {"seasonName": "Season 1", "episodes": [
                        {"episodeName": "Ep 1", "url": "https://player/s1e1"},
                        {"episodeName": "Ep 2", "url": "https://player/s1e2"}
                    ]},
                    {"seasonName": "Season 2", "episodes": [
                        {"episodeName": "Ep 1", "url": "https://player/s2e1"}
                    ]}
                ]
            }
        }"#;
        let resp: DetailResponse = serde_json::from_str(json).unwrap();
        let detail = resp.item.unwrap();
        assert_eq!(detail.player_url.as_deref(), Some("https://player/1"));
        assert_eq!(detail.description_or_placeholder(), DESCRIPTION_PLACEHOLDER);
        assert_eq!(detail.seasons().unwrap().len(), 2);
        assert_eq!(detail.episode_count(), 3);
        assert_eq!(detail.episode_at(2).unwrap().url, "https://player/s2e1");
        assert!(detail.episode_at(3).is_none());
    }

    #[test]
    fn test_detail_without_seasons() {
        let detail = ContentDetail {
            description: Some("Plot".into()),
            seasons: Some(vec![]),
            ..Default::default()
        };
        assert!(detail.seasons().is_none());
        assert_eq!(detail.episode_count(), 0);
        assert_eq!(detail.description_or_placeholder(), "Plot");
    }

    #[test]
    fn test_section_title_replaces_first_dash_only() {
        assert_eq!(section_title("trending"), "TRENDING");
        assert_eq!(section_title("indonesian-movies"), "INDONESIAN MOVIES");
        assert_eq!(section_title("a-b-c"), "A B-C");
    }

    #[test]
    fn test_search_title() {
        assert_eq!(search_title("batman"), "Hasil pencarian: \"batman\"");
    }

    #[test]
    fn test_view_state_default() {
        let state = ViewState::default();
        assert_eq!(state.current_action, "trending");
        assert_eq!(state.current_page, 1);
        assert!(!state.is_searching);
    }

    #[test]
    fn test_display() {
        let item = CatalogItem {
            title: "A".into(),
            year: Some("2020".into()),
            rating: Some("8".into()),
            kind: Some("movie".into()),
            ..Default::default()
        };
        assert_eq!(item.to_string(), "A (2020) [MOVIE] ★ 8");
    }
}
