use std::time::Duration;

use pathfinder_engine::{
    ApiClient, CatalogEntry, ClientSettings, FailureKind, ReqwestApiClient,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestApiClient {
    ReqwestApiClient::new(ClientSettings::with_base_url(format!("{}/api", server.uri())))
        .expect("client")
}

#[tokio::test]
async fn catalog_titles_keep_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/lectures"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "l3", "title": "Recursion", "week": 3},
            {"id": "l1", "title": "Variables"},
            {"id": "l2", "title": "Loops"}
        ])))
        .mount(&server)
        .await;

    let catalog = client_for(&server).fetch_catalog().await.expect("catalog");
    assert_eq!(
        catalog,
        vec![
            CatalogEntry { id: "l3".into(), title: "Recursion".into() },
            CatalogEntry { id: "l1".into(), title: "Variables".into() },
            CatalogEntry { id: "l2".into(), title: "Loops".into() },
        ]
    );
}

#[tokio::test]
async fn malformed_catalog_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/lectures"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "l1"}])))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_catalog().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
    assert!(err.message.contains("missing `title`"), "{}", err.message);
}

#[tokio::test]
async fn recommendation_posts_exact_body_and_returns_ordered_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/recommend"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "knownConcepts": ["A", "B"],
            "targetConcept": "C"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"recommended_concepts": ["A", "D", "C"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let path = client_for(&server)
        .get_recommendations(&["A".to_string(), "B".to_string()], "C")
        .await
        .expect("recommendation");
    assert_eq!(path, vec!["A", "D", "C"]);
}

#[tokio::test]
async fn error_status_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/recommend"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "unknown concept: Z"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_recommendations(&[], "Z")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
    assert_eq!(err.message, "unknown concept: Z");
}

#[tokio::test]
async fn slow_recommendation_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/recommend"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"recommended_concepts": []})),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::with_base_url(format!("{}/api", server.uri()))
    };
    let client = ReqwestApiClient::new(settings).expect("client");

    let err = client.get_recommendations(&[], "C").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_server_is_a_network_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    let base = format!("http://127.0.0.1:{port}/api");

    let client = ReqwestApiClient::new(ClientSettings::with_base_url(base)).expect("client");
    let err = client.fetch_catalog().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network, "{err:?}");
}

#[tokio::test]
async fn invalid_base_url_is_rejected() {
    let client =
        ReqwestApiClient::new(ClientSettings::with_base_url("not a url")).expect("client");
    let err = client.fetch_catalog().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn oversized_catalog_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/lectures"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string("[{\"id\":\"a\",\"title\":\"b\"}]"),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        max_bytes: 10,
        ..ClientSettings::with_base_url(format!("{}/api", server.uri()))
    };
    let client = ReqwestApiClient::new(settings).expect("client");
    let err = client.fetch_catalog().await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 10, .. }));
}

#[tokio::test]
async fn oversized_error_body_falls_back_to_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/recommend"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "x".repeat(2_000_000)})),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        max_bytes: 10,
        ..ClientSettings::with_base_url(format!("{}/api", server.uri()))
    };
    let client = ReqwestApiClient::new(settings).expect("client");
    let err = client.get_recommendations(&[], "C").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.message, "500 Internal Server Error");
}
