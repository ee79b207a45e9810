//! CLI Command Handlers
//!
//! Each handler takes its CLI args, a catalog client and the Output, and
//! returns an ExitCode. Handlers use the strict client calls so failures
//! reach the exit status instead of turning into empty listings.

use crate::api::{CatalogClient, CatalogError, CatalogQuery};
use crate::cli::{
    CategoryCmd, CategoryList, Cli, Command, DetailCmd, DetailReport, ExitCode, ItemList,
    ListCmd, Output, SearchCmd,
};
use crate::config::Config;
use crate::models::TRENDING;

/// Dispatch a parsed command line
pub async fn run(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);
    let config = cli.load_config();
    let client = build_client(&cli, &config);

    let Some(command) = cli.command else {
        return output.error("No command given", ExitCode::InvalidArgs);
    };

    match command {
        Command::Trending(cmd) => trending_cmd(cmd, &client, &output).await,
        Command::Category(cmd) => category_cmd(cmd, &client, &output).await,
        Command::Search(cmd) => search_cmd(cmd, &client, &output).await,
        Command::Detail(cmd) => detail_cmd(cmd, &client, &output).await,
        Command::Categories => categories_cmd(&config, &output),
    }
}

/// Client for the resolved endpoint, with the configured timeout if any
pub fn build_client(cli: &Cli, config: &Config) -> CatalogClient {
    let base_url = cli.base_url(config);
    match config.request_timeout() {
        Some(timeout) => CatalogClient::with_timeout(base_url, timeout),
        None => CatalogClient::with_base_url(base_url),
    }
}

/// Exit code for a catalog failure
pub fn exit_code_for(err: &CatalogError) -> ExitCode {
    match err {
        CatalogError::Request(_) | CatalogError::Status(_) => ExitCode::NetworkError,
        CatalogError::MissingItem => ExitCode::NoResults,
        CatalogError::InvalidResponse(_) | CatalogError::Unsuccessful => ExitCode::Error,
    }
}

// =============================================================================
// Listing Commands
// =============================================================================

async fn list_cmd(
    query: CatalogQuery,
    limit: usize,
    client: &CatalogClient,
    output: &Output,
) -> ExitCode {
    match client.try_fetch_items(&query).await {
        Ok(items) if items.is_empty() => output.error("No results", ExitCode::NoResults),
        Ok(mut items) => {
            items.truncate(limit);
            if let Err(e) = output.print(&ItemList(items)) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => {
            tracing::warn!(error = %e, "listing failed");
            output.error(format!("Fetch failed: {}", e), exit_code_for(&e))
        }
    }
}

pub async fn trending_cmd(cmd: ListCmd, client: &CatalogClient, output: &Output) -> ExitCode {
    output.info("Fetching trending...");
    list_cmd(CatalogQuery::category(TRENDING, 1), cmd.limit, client, output).await
}

pub async fn category_cmd(cmd: CategoryCmd, client: &CatalogClient, output: &Output) -> ExitCode {
    let action = cmd.action.trim();
    if action.is_empty() {
        return output.error("Category action must not be empty", ExitCode::InvalidArgs);
    }
    output.info(format!("Fetching {}...", action));
    list_cmd(CatalogQuery::category(action, 1), cmd.list.limit, client, output).await
}

pub async fn search_cmd(cmd: SearchCmd, client: &CatalogClient, output: &Output) -> ExitCode {
    if cmd.query.trim().is_empty() {
        return output.error("Search query must not be empty", ExitCode::InvalidArgs);
    }
    output.info(format!("Searching for: {}", cmd.query));
    list_cmd(CatalogQuery::search(&cmd.query), cmd.list.limit, client, output).await
}

// =============================================================================
// Detail Command
// =============================================================================

pub async fn detail_cmd(cmd: DetailCmd, client: &CatalogClient, output: &Output) -> ExitCode {
    if cmd.detail_path.trim().is_empty() {
        return output.error("Detail path must not be empty", ExitCode::InvalidArgs);
    }
    output.info(format!("Getting detail for: {}", cmd.detail_path));

    match client.detail(&cmd.detail_path).await {
        Ok(detail) => {
            if let Err(e) = output.print(&DetailReport(detail)) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => {
            tracing::warn!(error = %e, detail_path = %cmd.detail_path, "detail failed");
            output.error(format!("Detail failed: {}", e), exit_code_for(&e))
        }
    }
}

// =============================================================================
// Categories Command
// =============================================================================

pub fn categories_cmd(config: &Config, output: &Output) -> ExitCode {
    match output.print(&CategoryList::from_actions(&config.categories())) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_code_for(&CatalogError::Status(500)), ExitCode::NetworkError);
        assert_eq!(exit_code_for(&CatalogError::MissingItem), ExitCode::NoResults);
        assert_eq!(exit_code_for(&CatalogError::Unsuccessful), ExitCode::Error);
        assert_eq!(
            exit_code_for(&CatalogError::InvalidResponse("x".into())),
            ExitCode::Error
        );
    }

    #[test]
    fn test_build_client_prefers_flag() {
        use clap::Parser;
        let cli = Cli::parse_from(["cinegrid", "--base-url", "http://flag/api.php", "trending"]);
        let client = build_client(&cli, &Config::default());
        assert_eq!(client.base_url(), "http://flag/api.php");
    }
}
