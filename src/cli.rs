//! CLI - Command Line Interface for cinegrid
//!
//! Every listing the TUI can show is also scriptable. Output is JSON when
//! asked for or when stdout is not a terminal.
//!
//! # Examples
//!
//! ```bash
//! # Browse
//! cinegrid trending --limit 5
//! cinegrid category indonesian-movies
//!
//! # Search and inspect
//! cinegrid search "the batman" --json
//! cinegrid detail some-detail-path
//! ```

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fmt;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::config::Config;
use crate::models::{self, CatalogItem, ContentDetail};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Well-formed response with nothing in it
    NoResults = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// cinegrid - browse a streaming catalog from the terminal
///
/// Run without arguments to launch the interactive TUI.
/// Use subcommands for scriptable access.
#[derive(Parser, Debug)]
#[command(
    name = "cinegrid",
    version,
    about = "Terminal browser for a movie and series catalog",
    long_about = "Browse trending titles and categories, search the catalog \
                  and open episode players.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  cinegrid                          Launch interactive TUI\n\
                  cinegrid trending -l 5            Top five trending titles\n\
                  cinegrid search \"batman\" --json   Search as JSON\n\
                  cinegrid detail <path>            Show one title with episodes"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Catalog endpoint, overriding env and config
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }

    /// Config from `--config`, or the default location
    pub fn load_config(&self) -> Config {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    /// Endpoint: `--base-url`, then env, then config file, then default
    pub fn base_url(&self, config: &Config) -> String {
        self.base_url
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| config.base_url())
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Trending titles
    #[command(visible_alias = "tr")]
    Trending(ListCmd),

    /// Titles in a named category
    #[command(visible_alias = "cat")]
    Category(CategoryCmd),

    /// Search the catalog
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Full record for one title, with seasons and episodes
    #[command(visible_alias = "i")]
    Detail(DetailCmd),

    /// Configured category actions
    Categories,
}

/// Options shared by listing commands
#[derive(Args, Debug)]
pub struct ListCmd {
    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct CategoryCmd {
    /// Category action, e.g. `indonesian-movies`
    #[arg(required = true)]
    pub action: String,

    #[command(flatten)]
    pub list: ListCmd,
}

#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query
    #[arg(required = true)]
    pub query: String,

    #[command(flatten)]
    pub list: ListCmd,
}

#[derive(Args, Debug)]
pub struct DetailCmd {
    /// Detail path as printed by listing commands
    #[arg(required = true)]
    pub detail_path: String,
}

// =============================================================================
// JSON Output Format
// =============================================================================

/// Standard JSON envelope
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub exit_code: i32,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// A listing, one line per item in text mode
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ItemList(pub Vec<CatalogItem>);

impl fmt::Display for ItemList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            writeln!(f, "{:>3}. {}  <{}>", i + 1, item, item.detail_path)?;
        }
        Ok(())
    }
}

/// A detail record, multi-line in text mode
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct DetailReport(pub ContentDetail);

impl fmt::Display for DetailReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = &self.0;
        writeln!(f, "{}", detail)?;
        if let Some(kind) = detail.kind.as_deref().filter(|k| !k.is_empty()) {
            writeln!(f, "Type: {}", kind.to_uppercase())?;
        }
        if let Some(url) = detail.player_url.as_deref().filter(|u| !u.is_empty()) {
            writeln!(f, "Player: {}", url)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", detail.description_or_placeholder())?;

        for season in detail.seasons().unwrap_or_default() {
            writeln!(f)?;
            writeln!(f, "{}", season)?;
            for episode in &season.episodes {
                writeln!(f, "  {}  {}", episode.episode_name, episode.url)?;
            }
        }
        Ok(())
    }
}

/// Category actions with their display titles
#[derive(Debug, Serialize)]
pub struct CategoryEntry {
    pub action: String,
    pub title: String,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CategoryList(pub Vec<CategoryEntry>);

impl CategoryList {
    pub fn from_actions(actions: &[String]) -> Self {
        Self(
            actions
                .iter()
                .map(|action| CategoryEntry {
                    action: action.clone(),
                    title: models::section_title(action),
                })
                .collect(),
        )
    }
}

impl fmt::Display for CategoryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.0.iter().enumerate() {
            writeln!(f, "{}  {:<24} {}", i + 1, entry.action, entry.title)?;
        }
        Ok(())
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Render success data without printing it
    pub fn render<T: Serialize + fmt::Display>(&self, data: &T) -> anyhow::Result<String> {
        if self.json {
            Ok(serde_json::to_string_pretty(&JsonOutput::success(data))?)
        } else {
            Ok(data.to_string().trim_end().to_string())
        }
    }

    /// Print success data
    pub fn print<T: Serialize + fmt::Display>(&self, data: &T) -> anyhow::Result<()> {
        println!("{}", self.render(data)?);
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from(["cinegrid"]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::parse_from(["cinegrid", "search", "batman", "-l", "5"]);
        assert!(cli.is_cli_mode());
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.query, "batman");
                assert_eq!(cmd.list.limit, 5);
            }
            other => panic!("Expected Search command, got {:?}", other),
        }
    }

    #[test]
    fn test_category_default_limit() {
        let cli = Cli::parse_from(["cinegrid", "cat", "kdrama"]);
        match cli.command {
            Some(Command::Category(cmd)) => {
                assert_eq!(cmd.action, "kdrama");
                assert_eq!(cmd.list.limit, 20);
            }
            other => panic!("Expected Category command, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "cinegrid",
            "--json",
            "--quiet",
            "--base-url",
            "http://localhost:9000/api.php",
            "trending",
        ]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(cli.should_json());
        assert_eq!(
            cli.base_url(&Config::default()),
            "http://localhost:9000/api.php"
        );
    }

    #[test]
    fn test_base_url_falls_back_to_config() {
        let cli = Cli::parse_from(["cinegrid", "trending"]);
        let config = Config {
            base_url: Some("http://from-config/api.php".into()),
            ..Default::default()
        };
        // Env may override the file in a developer shell
        if std::env::var(crate::config::BASE_URL_ENV).is_err() {
            assert_eq!(cli.base_url(&config), "http://from-config/api.php");
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NetworkError), 3);
        assert_eq!(i32::from(ExitCode::NoResults), 4);
    }

    #[test]
    fn test_json_envelope() {
        let output = Output {
            json: true,
            quiet: false,
        };
        let list = ItemList(vec![CatalogItem {
            title: "A".into(),
            detail_path: "a".into(),
            ..Default::default()
        }]);
        let rendered = output.render(&list).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["exit_code"], 0);
        assert_eq!(value["data"][0]["title"], "A");
        assert_eq!(value["data"][0]["detailPath"], "a");
    }

    #[test]
    fn test_error_envelope() {
        let json = serde_json::to_value(JsonOutput::<()>::error_msg("boom", ExitCode::NoResults))
            .unwrap();
        assert_eq!(json["error"], "boom");
        assert_eq!(json["exit_code"], 4);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_text_listing() {
        let output = Output {
            json: false,
            quiet: false,
        };
        let list = ItemList(vec![CatalogItem {
            title: "A".into(),
            year: Some("2020".into()),
            detail_path: "a".into(),
            ..Default::default()
        }]);
        assert_eq!(output.render(&list).unwrap(), "  1. A (2020)  <a>");
    }

    #[test]
    fn test_detail_report_lists_episodes() {
        let detail = ContentDetail {
            title: "Show".into(),
            seasons: Some(vec![crate::models::Season {
                season_name: "Season 1".into(),
                episodes: vec![crate::models::EpisodeLink {
                    episode_name: "Ep 1".into(),
                    url: "https://p/1".into(),
                }],
            }]),
            ..Default::default()
        };
        let text = DetailReport(detail).to_string();
        assert!(text.contains(crate::models::DESCRIPTION_PLACEHOLDER));
        assert!(text.contains("Season 1 (1 episodes)"));
        assert!(text.contains("  Ep 1  https://p/1"));
    }

    #[test]
    fn test_category_list() {
        let list = CategoryList::from_actions(&["trending".into(), "indonesian-movies".into()]);
        assert_eq!(list.0[1].title, "INDONESIAN MOVIES");
    }
}
