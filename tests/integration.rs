//! Integration tests hitting real search engines over the network.
//!
//! These tests are marked with `#[ignore]` by default because they require
//! network access and may be slow or flaky.
//!
//! Run with: `cargo test --test integration -- --ignored`

use std::time::Duration;

use agg_search::{Gateway, GatewayError};

#[tokio::test]
#[ignore]
async fn test_single_engine_fetch_google() {
    let gateway = Gateway::new().unwrap();
    let search = gateway.search("gg", "rust programming").await.unwrap();

    println!(
        "gg -> HTTP {} ({} bytes, {} parsed results)",
        search.outcome.status_code,
        search.outcome.raw_body.len(),
        search.results.len()
    );
    assert_eq!(search.outcome.engine, "gg");
    assert!(search
        .outcome
        .request_url
        .starts_with("https://www.google.com/search?q="));
}

#[tokio::test]
#[ignore]
async fn test_fan_out_over_ai_category() {
    let gateway = Gateway::new().unwrap();
    let response = gateway
        .category_search("AI Search", "rust programming language")
        .await
        .unwrap();

    assert_eq!(response.results.len(), 9);
    for engine in &response.results {
        println!(
            "{:<6} HTTP {:<3} error={:?} results={}",
            engine.outcome.engine,
            engine.outcome.status_code,
            engine.outcome.error,
            engine.results.len()
        );
    }
    // Engines come back in registry-declared order regardless of completion.
    assert_eq!(response.results[0].outcome.engine, "andi");
    assert_eq!(response.results[4].outcome.engine, "gg");
}

#[tokio::test]
#[ignore]
async fn test_short_timeout_degrades_instead_of_failing() {
    let mut gateway = Gateway::new().unwrap();
    gateway.set_timeout(Duration::from_millis(1));

    let keys = vec!["gg".to_string(), "gh".to_string()];
    let results = gateway.fan_out(&keys, "rust").await.unwrap();

    assert_eq!(results.len(), 2);
    for engine in results {
        assert_eq!(engine.outcome.status_code, 0);
        assert!(engine.outcome.error.is_some());
        assert!(engine.results.is_empty());
    }
}

#[tokio::test]
#[ignore]
async fn test_fan_out_rejects_unknown_engine_before_any_fetch() {
    let gateway = Gateway::new().unwrap();
    let keys = vec!["gg".to_string(), "definitely-not-an-engine".to_string()];
    let err = gateway.fan_out(&keys, "rust").await.unwrap_err();
    match err {
        GatewayError::UnknownEngines(invalid) => {
            assert_eq!(invalid, vec!["definitely-not-an-engine"])
        }
        other => panic!("Expected UnknownEngines, got {:?}", other),
    }
}
