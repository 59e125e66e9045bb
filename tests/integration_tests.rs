//! Integration tests for EngineerVault
//!
//! These tests exercise the catalog filters end to end and run the Open Library
//! source against a local mock HTTP server.

use engineer_vault::catalog::{filter, suggestions, Catalog};
use engineer_vault::config::{read_config_file, RemoteConfig};
use engineer_vault::models::{BookYear, Category, FilterSelection, Level, ResourceType};
use engineer_vault::session::{LookupPhase, ShellCommand, VaultSession};
use engineer_vault::sources::{BookSource, LookupOutcome, OpenLibrarySource, SourceError};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

fn remote_config(base_url: &str) -> RemoteConfig {
    RemoteConfig {
        base_url: base_url.to_string(),
        site_base: "https://openlibrary.org".to_string(),
        ..Default::default()
    }
}

fn doc(n: usize) -> serde_json::Value {
    json!({
        "title": format!("Mechanics Volume {}", n),
        "author_name": ["A. Author"],
        "first_publish_year": 1990 + n,
        "key": format!("/works/OL{}W", n),
    })
}

// ===== Catalog =====

#[test]
fn test_unconstrained_selection_returns_whole_catalog_in_order() {
    let catalog = Catalog::builtin();
    let visible = filter(catalog.resources(), &FilterSelection::default());
    let titles: Vec<&str> = visible.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Finite Element Analysis Fundamentals",
            "High-Efficiency Motor Drive Blueprint",
            "Autonomous Robot Control in Python",
            "STM32 Embedded Systems Lab",
        ]
    );
}

#[test]
fn test_catalog_scenarios() {
    let catalog = Catalog::builtin();
    let titles = |selection: &FilterSelection| -> Vec<String> {
        filter(catalog.resources(), selection)
            .into_iter()
            .map(|r| r.title.clone())
            .collect()
    };

    assert_eq!(
        titles(&FilterSelection::new("simulation")),
        vec!["Finite Element Analysis Fundamentals"]
    );
    assert_eq!(
        titles(&FilterSelection::new("PYTHON")),
        titles(&FilterSelection::new("python"))
    );
    assert_eq!(
        titles(
            &FilterSelection::default()
                .category(Category::EmbeddedSystems)
                .level(Level::Beginner)
        ),
        vec!["STM32 Embedded Systems Lab"]
    );
    assert_eq!(
        titles(&FilterSelection::default().kind(ResourceType::Code)),
        vec!["Autonomous Robot Control in Python"]
    );
    assert_eq!(
        titles(&FilterSelection::default().year("2023")),
        vec!["High-Efficiency Motor Drive Blueprint"]
    );
    assert!(titles(&FilterSelection::new("quantum")).is_empty());
}

#[test]
fn test_filtering_is_idempotent() {
    let catalog = Catalog::builtin();
    let selection = FilterSelection::new("control").level(Level::Research);

    let once: Vec<_> = filter(catalog.resources(), &selection)
        .into_iter()
        .cloned()
        .collect();
    let twice = filter(&once, &selection);

    assert_eq!(once.len(), 1);
    assert_eq!(twice.len(), once.len());
    assert_eq!(twice[0], &once[0]);
}

#[test]
fn test_suggestions() {
    let catalog = Catalog::builtin();
    assert_eq!(
        suggestions(catalog.resources(), ""),
        vec!["robotics control", "MATLAB simulation", "embedded C optimization"]
    );
    assert!(suggestions(catalog.resources(), "r").len() <= 4);
    assert_eq!(suggestions(catalog.resources(), "SLAM"), vec!["slam"]);
}

// ===== Open Library source =====

#[tokio::test]
async fn test_blank_query_never_reaches_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"docs": []}"#)
        .expect(0)
        .create_async()
        .await;

    let source = OpenLibrarySource::from_config(&remote_config(&server.url())).unwrap();
    assert!(source.search("").await.is_empty());
    assert!(source.search("   ").await.is_empty());
    assert!(matches!(source.lookup("\t").await, LookupOutcome::NoMatches));

    mock.assert_async().await;
}

#[test]
fn test_blank_query_without_runtime() {
    let source = OpenLibrarySource::from_config(&remote_config("http://127.0.0.1:9")).unwrap();
    let books = tokio_test::block_on(source.search("  "));
    assert!(books.is_empty());
}

#[tokio::test]
async fn test_lookup_maps_documents() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({
        "numFound": 2,
        "docs": [
            {
                "title": "Theory of Machines",
                "author_name": ["R. S. Khurmi", "J. K. Gupta"],
                "first_publish_year": 1976,
                "ia": ["theoryofmachines00khur"],
                "ebook_access": "public",
                "key": "/works/OL1W",
                "cover_i": 7
            },
            {
                "key": "/works/OL2W",
                "ebook_access": "borrowable",
                "ia": ["restricted0000"]
            }
        ]
    });
    let mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "theory of machines".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(1)
        .create_async()
        .await;

    let source = OpenLibrarySource::from_config(&remote_config(&server.url())).unwrap();
    let books = source.search("  theory of machines ").await;
    mock.assert_async().await;

    assert_eq!(books.len(), 2);
    assert_eq!(books[0].title, "Theory of Machines");
    assert_eq!(books[0].author, "R. S. Khurmi");
    assert_eq!(books[0].year, BookYear::Known(1976));
    assert_eq!(
        books[0].download_link.as_deref(),
        Some("https://archive.org/download/theoryofmachines00khur/theoryofmachines00khur.pdf")
    );
    assert_eq!(books[0].cover_id, Some(7));

    assert_eq!(books[1].title, "Untitled");
    assert_eq!(books[1].author, "Unknown");
    assert_eq!(books[1].year, BookYear::Unknown);
    assert!(books[1].download_link.is_none());
    assert_eq!(
        books[1].online_link.as_deref(),
        Some("https://openlibrary.org/works/OL2W")
    );
}

#[tokio::test]
async fn test_server_error_resolves_to_empty() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_status(500)
        .expect(3)
        .create_async()
        .await;

    let source = OpenLibrarySource::from_config(&remote_config(&server.url())).unwrap();
    assert!(source.search("statics").await.is_empty());

    let outcome = source.lookup("statics").await;
    assert!(outcome.is_failure());
    assert!(matches!(outcome.error(), Some(SourceError::Api { status: 500 })));

    let err = source.try_search("statics").await.unwrap_err();
    assert!(matches!(err, SourceError::Api { status: 500 }));
}

#[tokio::test]
async fn test_malformed_body_resolves_to_empty() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let source = OpenLibrarySource::from_config(&remote_config(&server.url())).unwrap();
    assert!(source.search("dynamics").await.is_empty());
    assert!(matches!(
        source.lookup("dynamics").await,
        LookupOutcome::Failed(SourceError::Parse(_))
    ));
}

#[tokio::test]
async fn test_missing_docs_field_is_a_parse_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"numFound": 0}"#)
        .create_async()
        .await;

    let source = OpenLibrarySource::from_config(&remote_config(&server.url())).unwrap();
    let err = source.try_search("fluids").await.unwrap_err();
    assert!(matches!(err, SourceError::Parse(_)));
}

#[tokio::test]
async fn test_results_are_capped_in_provider_order() {
    let mut server = mockito::Server::new_async().await;
    let docs: Vec<_> = (1..=12).map(doc).collect();
    let _mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "docs": docs }).to_string())
        .create_async()
        .await;

    let source = OpenLibrarySource::from_config(&remote_config(&server.url())).unwrap();
    let books = source.search("mechanics").await;

    assert_eq!(books.len(), 10);
    assert_eq!(books[0].title, "Mechanics Volume 1");
    assert_eq!(books[9].title, "Mechanics Volume 10");
}

#[tokio::test]
async fn test_result_cap_comes_from_config_file() {
    let mut server = mockito::Server::new_async().await;
    let docs: Vec<_> = (1..=12).map(doc).collect();
    let mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::UrlEncoded("limit".into(), "3".into()))
        .with_status(200)
        .with_body(json!({ "docs": docs }).to_string())
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engineer-vault.toml");
    std::fs::write(
        &path,
        format!(
            "[remote]\nbase_url = \"{}\"\nresult_cap = 3\ntimeout_secs = 2\n",
            server.url()
        ),
    )
    .unwrap();

    let config = read_config_file(&path).unwrap();
    let source = OpenLibrarySource::from_config(&config.remote).unwrap();
    let books = source.search("mechanics").await;
    mock.assert_async().await;

    assert_eq!(books.len(), 3);
    assert_eq!(books[2].title, "Mechanics Volume 3");
}

#[tokio::test]
async fn test_unreachable_host_resolves_to_empty() {
    // Nothing listens on port 9 locally; the connection is refused
    let source = OpenLibrarySource::from_config(&remote_config("http://127.0.0.1:9")).unwrap();
    assert!(source.search("statics").await.is_empty());
    assert!(source.lookup("statics").await.is_failure());
}

/// Accept connections and hold them open without ever answering
async fn silent_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_timeout_resolves_to_empty() {
    let config = RemoteConfig {
        timeout_secs: 1,
        ..remote_config(&silent_server().await)
    };
    let source = OpenLibrarySource::from_config(&config).unwrap();

    let started = std::time::Instant::now();
    assert!(source.search("statics").await.is_empty());
    assert!(matches!(
        source.lookup("statics").await,
        LookupOutcome::Failed(SourceError::Timeout)
    ));
    assert!(started.elapsed() < std::time::Duration::from_secs(10));
}

// ===== Session =====

#[tokio::test]
async fn test_session_lookup_against_server() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "docs": [doc(1)] }).to_string())
        .create_async()
        .await;

    let source = OpenLibrarySource::from_config(&remote_config(&server.url())).unwrap();
    let mut session = VaultSession::builtin(Arc::new(source));

    session.apply("robot".parse::<ShellCommand>().unwrap());
    assert_eq!(session.visible().len(), 1);

    assert!(session.lookup_task("mechanics").await);
    assert_eq!(session.remote().phase(), LookupPhase::Displaying);
    assert_eq!(session.remote().books()[0].title, "Mechanics Volume 1");

    // Clearing the query resets the visible list but not the remote list
    session.apply("".parse::<ShellCommand>().unwrap());
    assert_eq!(session.visible().len(), 4);
    assert_eq!(session.remote().books().len(), 1);
}
