use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use biblioresolve::Resolver;
use biblioresolve::config::LookupConfig;
use biblioresolve::server::build_router;
use biblioresolve::state::AppState;
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> LookupConfig {
    LookupConfig {
        bnf_sru_url: format!("{}/api/SRU", server.uri()),
        bnf_timeout: Duration::from_millis(500),
        google_books_url: server.uri(),
        google_books_timeout: Duration::from_millis(500),
        openlibrary_url: format!("{}/ol", server.uri()),
        openlibrary_covers_url: "https://covers.test".to_string(),
        openlibrary_timeout: Duration::from_millis(500),
        translate_url: server.uri(),
        translate_descriptions: false,
        ..LookupConfig::default()
    }
}

fn app(config: &LookupConfig) -> Router {
    let resolver = Resolver::from_config(config).expect("Failed to build resolver");
    build_router(AppState::new(resolver), &[])
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn mount_dune(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .and(query_param("q", "isbn:9780441013593"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "volumeInfo": {
                "title": "Dune",
                "authors": ["Frank Herbert"],
                "publisher": "Ace",
                "publishedDate": "1990",
                "language": "en"
            } }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let req = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let response = app(&test_config(&server)).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_identifier_without_isbn_characters_is_rejected() {
    let server = MockServer::start().await;
    let req = Request::builder()
        .uri("/api/isbn?isbn=abc")
        .body(Body::empty())
        .unwrap();

    let response = app(&test_config(&server)).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": "missing isbn" }));

    // No catalog was contacted
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_missing_isbn_parameter_is_rejected() {
    let server = MockServer::start().await;
    let req = Request::builder()
        .uri("/api/isbn")
        .body(Body::empty())
        .unwrap();

    let response = app(&test_config(&server)).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_book_is_not_found() {
    // Every upstream answers 404
    let server = MockServer::start().await;
    let req = Request::builder()
        .uri("/api/isbn?isbn=978-0-00-000000-2")
        .body(Body::empty())
        .unwrap();

    let response = app(&test_config(&server)).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({ "error": "not_found" }));
}

#[tokio::test]
async fn test_lookup_payload() {
    let server = MockServer::start().await;
    mount_dune(&server).await;

    let req = Request::builder()
        .uri("/api/isbn?isbn=978-0-441-01359-3&lang=en")
        .body(Body::empty())
        .unwrap();

    let response = app(&test_config(&server)).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["source"], "google");
    assert_eq!(body["isbn"], "9780441013593");
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["author"], "Frank Herbert");
    assert_eq!(body["publisher"], "Ace");
    assert_eq!(body["publication_date"], "1990");
    assert_eq!(body["language"], "English");
    assert_eq!(
        body["cover_url"],
        "https://covers.test/b/isbn/9780441013593-L.jpg"
    );
}

#[tokio::test]
async fn test_lookup_by_path() {
    let server = MockServer::start().await;
    mount_dune(&server).await;

    let req = Request::builder()
        .uri("/api/lookup/978-0441013593")
        .body(Body::empty())
        .unwrap();
    let response = app(&test_config(&server)).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["title"], "Dune");
}

#[tokio::test]
async fn test_translate_empty_text() {
    let server = MockServer::start().await;
    let req = Request::builder()
        .method("POST")
        .uri("/api/translate")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "text": "   " }).to_string()))
        .unwrap();

    let response = app(&test_config(&server)).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "text": "" }));
}

#[tokio::test]
async fn test_translate_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .and(query_param("tl", "de"))
        .and(query_param("q", "Hello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[["Hallo", "Hello"]]])))
        .expect(1)
        .mount(&server)
        .await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/translate")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "text": "Hello", "target": "de" }).to_string()))
        .unwrap();

    let response = app(&test_config(&server)).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "text": "Hallo" }));
}

#[tokio::test]
async fn test_translate_failure_echoes_input() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/translate")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "text": "Hello there" }).to_string()))
        .unwrap();

    let response = app(&test_config(&server)).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "text": "Hello there" }));
}

#[tokio::test]
async fn test_translate_unreadable_body_yields_empty_text() {
    let server = MockServer::start().await;
    let req = Request::builder()
        .method("POST")
        .uri("/api/translate")
        .header("content-type", "application/json")
        .body(Body::from("{\"text\": "))
        .unwrap();

    let response = app(&test_config(&server)).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "text": "" }));

    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}
