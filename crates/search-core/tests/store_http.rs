//! Store 对 Elasticsearch REST 接口的调用，用 mockito 模拟引擎

use mockito::{Matcher, Server};
use search_core::{Document, Store, StoreConfig, StoreError, index_mapping};
use serde_json::json;

fn store_for(server: &Server) -> Store {
    Store::new(StoreConfig {
        url: server.url(),
        index_name: "juejin".to_string(),
    })
    .unwrap()
}

fn sample_document(id: &str) -> Document {
    Document {
        id: id.to_string(),
        title: "Rust 异步编程".to_string(),
        brief: "从 Future 到 tokio".to_string(),
        category: "后端".to_string(),
        create_time: "1620000000".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn exists_maps_status_codes() {
    let mut server = Server::new_async().await;
    let found = server.mock("HEAD", "/juejin/_doc/1").with_status(200).create_async().await;
    let missing = server.mock("HEAD", "/juejin/_doc/2").with_status(404).create_async().await;
    let broken = server.mock("HEAD", "/juejin/_doc/3").with_status(503).create_async().await;

    let store = store_for(&server);
    assert!(store.exists("1").await.unwrap());
    assert!(!store.exists("2").await.unwrap());
    match store.exists("3").await {
        Err(StoreError::Query { status, .. }) => assert_eq!(status, 503),
        other => panic!("unexpected result: {other:?}"),
    }

    found.assert_async().await;
    missing.assert_async().await;
    broken.assert_async().await;
}

#[tokio::test]
async fn delete_maps_status_codes() {
    let mut server = Server::new_async().await;
    let _deleted = server
        .mock("DELETE", "/juejin/_doc/1")
        .with_status(200)
        .with_body(r#"{"result":"deleted"}"#)
        .create_async()
        .await;
    let _missing = server
        .mock("DELETE", "/juejin/_doc/2")
        .with_status(404)
        .with_body(r#"{"result":"not_found"}"#)
        .create_async()
        .await;
    let _broken = server.mock("DELETE", "/juejin/_doc/3").with_status(500).create_async().await;

    let store = store_for(&server);
    assert!(store.delete("1").await.unwrap());
    assert!(!store.delete("2").await.unwrap());
    assert!(matches!(store.delete("3").await, Err(StoreError::Query { status: 500, .. })));
}

#[tokio::test]
async fn create_puts_document_by_id() {
    let mut server = Server::new_async().await;
    let doc = sample_document("6956");
    let mock = server
        .mock("PUT", "/juejin/_doc/6956")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "article_id": "6956",
            "title": "Rust 异步编程",
            "brief_content": "从 Future 到 tokio",
            "author_info": { "company": "" }
        })))
        .with_status(201)
        .with_body(r#"{"result":"created"}"#)
        .create_async()
        .await;

    store_for(&server).create(&doc).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn create_reports_engine_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("PUT", "/juejin/_doc/6956")
        .with_status(400)
        .with_body(r#"{"error":{"type":"mapper_parsing_exception","reason":"failed to parse field [create_time]"},"status":400}"#)
        .create_async()
        .await;

    let err = store_for(&server).create(&sample_document("6956")).await.unwrap_err();
    match err {
        StoreError::Write { id, status, kind, reason } => {
            assert_eq!(id, "6956");
            assert_eq!(status, 400);
            assert_eq!(kind, "mapper_parsing_exception");
            assert_eq!(reason, "failed to parse field [create_time]");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn create_index_rejected_when_exists() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/juejin")
        .match_body(Matcher::PartialJson(json!({
            "mappings": { "properties": { "article_id": { "type": "keyword" } } }
        })))
        .with_status(400)
        .with_body(r#"{"error":{"type":"resource_already_exists_exception","reason":"index [juejin] already exists"},"status":400}"#)
        .create_async()
        .await;

    let err = store_for(&server).create_index(&index_mapping()).await.unwrap_err();
    assert!(matches!(err, StoreError::IndexCreation { status: 400, ref reason } if reason.contains("already exists")));
    mock.assert_async().await;
}

#[tokio::test]
async fn search_sends_phrase_query_and_decodes_highlights() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/juejin/_search")
        .match_body(Matcher::PartialJson(json!({
            "query": { "multi_match": { "query": "Rust 异步编程", "type": "phrase" } },
            "size": 25
        })))
        .with_status(200)
        .with_body(
            json!({
                "took": 2,
                "hits": {
                    "total": { "value": 1, "relation": "eq" },
                    "hits": [{
                        "_id": "6956",
                        "_source": sample_document("6956"),
                        "highlight": { "title": ["<em>Rust</em> <em>异步</em><em>编程</em>"] },
                        "sort": [15.2, 3]
                    }]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let results = store_for(&server).search("Rust 异步编程", None).await.unwrap();
    assert_eq!(results.total, 1);
    assert_eq!(results.hits[0].document.id, "6956");
    assert_eq!(results.hits[0].title(), "<em>Rust</em> <em>异步</em><em>编程</em>");
    assert_eq!(results.hits[0].cursor().as_deref(), Some("[15.2,3]"));
    mock.assert_async().await;
}

#[tokio::test]
async fn search_after_is_forwarded() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/juejin/_search")
        .match_body(Matcher::PartialJson(json!({ "search_after": ["1620000000", 4] })))
        .with_status(200)
        .with_body(r#"{"hits":{"total":{"value":0,"relation":"eq"},"hits":[]}}"#)
        .create_async()
        .await;

    let results = store_for(&server)
        .search("", Some(r#"["1620000000", 4]"#))
        .await
        .unwrap();
    assert!(results.hits.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn search_failure_is_query_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/juejin/_search")
        .with_status(404)
        .with_body(r#"{"error":{"type":"index_not_found_exception","reason":"no such index [juejin]"},"status":404}"#)
        .create_async()
        .await;

    let err = store_for(&server).search("rust", None).await.unwrap_err();
    assert!(matches!(err, StoreError::Query { status: 404, ref reason } if reason.starts_with("index_not_found_exception")));
}

#[tokio::test]
async fn invalid_cursor_never_reaches_engine() {
    let mut server = Server::new_async().await;
    let mock = server.mock("POST", "/juejin/_search").expect(0).create_async().await;

    let err = store_for(&server).search("rust", Some("page-2")).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidCursor(_)));
    mock.assert_async().await;
}
