//! Integration tests for remote exam feed resolution against a mock server.

use std::time::Duration;

use chrono::Datelike;
use examtab_core::{
    CatalogSource, ExamCatalog, ExamFeed, ExamId, FallbackDates, FetchError, HttpExamFeed,
};

const FEED_BODY: &str = r#"[
    {"name": "JEE Main", "date": "22-01-2027"},
    {"name": "NEET", "date": "02-05-2027"},
    {"name": "JEE Advanced", "date": "23-05-2027"},
    {"name": "CUET", "date": "15-05-2027"}
]"#;

fn feed_for(server: &mockito::ServerGuard) -> HttpExamFeed {
    let url = format!("{}/exam-info.json", server.url());
    HttpExamFeed::new(url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_remote_dates_replace_fallback() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/exam-info.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(FEED_BODY)
        .create_async()
        .await;

    let catalog = ExamCatalog::load(&feed_for(&server), &FallbackDates::default()).await;

    mock.assert_async().await;
    assert_eq!(catalog.source(), CatalogSource::Remote);
    let jee = catalog.get(ExamId::JeeMain).unwrap();
    assert_eq!((jee.day(), jee.month(), jee.year()), (22, 1, 2027));
    assert_eq!(catalog.get(ExamId::JeeAdvanced).unwrap().day(), 23);
}

#[tokio::test]
async fn test_server_error_uses_fallback() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/exam-info.json")
        .with_status(503)
        .create_async()
        .await;

    let feed = feed_for(&server);
    assert!(matches!(
        feed.fetch().await,
        Err(FetchError::Status { status: 503 })
    ));

    let fallback = FallbackDates::default();
    let catalog = ExamCatalog::load(&feed, &fallback).await;
    assert_eq!(catalog, ExamCatalog::fallback(&fallback));
    assert_eq!(catalog.get(ExamId::JeeMain), Some(fallback.jee_main));
}

#[tokio::test]
async fn test_malformed_json_uses_fallback() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/exam-info.json")
        .with_status(200)
        .with_body(r#"[{"name": "JEE Main", "date": "22-01-2027"}, {"name": "#)
        .create_async()
        .await;

    let feed = feed_for(&server);
    assert!(matches!(feed.fetch().await, Err(FetchError::Decode(_))));

    let catalog = ExamCatalog::load(&feed, &FallbackDates::default()).await;
    assert_eq!(catalog.source(), CatalogSource::Fallback);
}

#[tokio::test]
async fn test_bad_date_discards_whole_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/exam-info.json")
        .with_status(200)
        .with_body(
            r#"[{"name": "JEE Main", "date": "22-01-2027"},
                {"name": "NEET", "date": "May 2027"}]"#,
        )
        .create_async()
        .await;

    let fallback = FallbackDates::default();
    let catalog = ExamCatalog::load(&feed_for(&server), &fallback).await;
    assert_eq!(catalog.get(ExamId::JeeMain), Some(fallback.jee_main));
    assert_eq!(catalog.get(ExamId::Neet), Some(fallback.neet));
}

#[tokio::test]
async fn test_unreachable_host_uses_fallback() {
    // Nothing listens on the discard port.
    let url = "http://127.0.0.1:9/exam-info.json";
    let feed = HttpExamFeed::new(url, Duration::from_secs(2)).unwrap();
    let catalog = ExamCatalog::load(&feed, &FallbackDates::default()).await;
    assert_eq!(catalog.source(), CatalogSource::Fallback);
}

#[tokio::test]
async fn test_same_response_loads_identically() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/exam-info.json")
        .with_status(200)
        .with_body(FEED_BODY)
        .expect(2)
        .create_async()
        .await;

    let feed = feed_for(&server);
    let fallback = FallbackDates::default();
    let first = ExamCatalog::load(&feed, &fallback).await;
    let second = ExamCatalog::load(&feed, &fallback).await;
    assert_eq!(first, second);
    assert_eq!(first.source(), CatalogSource::Remote);
}
