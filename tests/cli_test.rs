//! CLI command tests
//!
//! Runs the command handlers against a mock catalog and checks exit codes.

use mockito::{Matcher, Server};

use cinegrid::api::CatalogClient;
use cinegrid::cli::{CategoryCmd, DetailCmd, ExitCode, ListCmd, Output, SearchCmd};
use cinegrid::commands;
use cinegrid::config::Config;

fn quiet_json() -> Output {
    Output {
        json: true,
        quiet: true,
    }
}

#[tokio::test]
async fn test_trending_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::UrlEncoded("action".into(), "trending".into()))
        .with_status(200)
        .with_body(r#"{"success":true,"items":[{"title":"A","detailPath":"a"}]}"#)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let code = commands::trending_cmd(ListCmd { limit: 5 }, &client, &quiet_json()).await;

    mock.assert_async().await;
    assert_eq!(code, ExitCode::Success);
}

#[tokio::test]
async fn test_empty_listing_is_no_results() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"success":true,"items":[]}"#)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let cmd = CategoryCmd {
        action: "anime".into(),
        list: ListCmd { limit: 20 },
    };
    let code = commands::category_cmd(cmd, &client, &quiet_json()).await;
    assert_eq!(code, ExitCode::NoResults);
}

#[tokio::test]
async fn test_server_error_is_network_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let cmd = SearchCmd {
        query: "batman".into(),
        list: ListCmd { limit: 20 },
    };
    let code = commands::search_cmd(cmd, &client, &quiet_json()).await;
    assert_eq!(code, ExitCode::NetworkError);
}

#[tokio::test]
async fn test_unsuccessful_listing_is_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"success":false}"#)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let code = commands::trending_cmd(ListCmd { limit: 20 }, &client, &quiet_json()).await;
    assert_eq!(code, ExitCode::Error);
}

#[tokio::test]
async fn test_blank_arguments_are_rejected() {
    // No request may be made
    let client = CatalogClient::with_base_url("http://127.0.0.1:1/api.php");

    let search = SearchCmd {
        query: "  ".into(),
        list: ListCmd { limit: 20 },
    };
    assert_eq!(
        commands::search_cmd(search, &client, &quiet_json()).await,
        ExitCode::InvalidArgs
    );

    let detail = DetailCmd {
        detail_path: String::new(),
    };
    assert_eq!(
        commands::detail_cmd(detail, &client, &quiet_json()).await,
        ExitCode::InvalidArgs
    );
}

#[tokio::test]
async fn test_detail_success_and_missing() {
    let mut server = Server::new_async().await;
    let _found = server
        .mock("GET", "/")
        .match_query(Matcher::UrlEncoded("detailPath".into(), "found".into()))
        .with_status(200)
        .with_body(r#"{"item":{"title":"Found","playerUrl":"https://p"}}"#)
        .create_async()
        .await;
    let _missing = server
        .mock("GET", "/")
        .match_query(Matcher::UrlEncoded("detailPath".into(), "missing".into()))
        .with_status(200)
        .with_body(r#"{}"#)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let found = DetailCmd {
        detail_path: "found".into(),
    };
    assert_eq!(
        commands::detail_cmd(found, &client, &quiet_json()).await,
        ExitCode::Success
    );

    let missing = DetailCmd {
        detail_path: "missing".into(),
    };
    assert_eq!(
        commands::detail_cmd(missing, &client, &quiet_json()).await,
        ExitCode::NoResults
    );
}

#[test]
fn test_categories_command() {
    let config = Config {
        categories: Some(vec!["anime".into()]),
        ..Default::default()
    };
    assert_eq!(
        commands::categories_cmd(&config, &quiet_json()),
        ExitCode::Success
    );
}
