//! Integration tests for the component asset server.
//!
//! Each test spins up an Axum server on a random port with an isolated
//! temporary component directory and exercises the real HTTP contract.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::net::TcpListener;

use widget_host::registry::ComponentRegistry;
use widget_host::server::component_routes;
use widget_host::store::ComponentStore;

/// Start a server on a random port, return (port, registry, tempdir guard).
async fn start_server() -> (u16, Arc<ComponentRegistry>, TempDir) {
    let dir = TempDir::new().unwrap();
    let registry = Arc::new(ComponentRegistry::new(ComponentStore::new(
        dir.path().to_path_buf(),
    )));
    let app = component_routes(Arc::clone(&registry));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (port, registry, dir)
}

fn url(port: u16, path: &str) -> String {
    format!("http://127.0.0.1:{port}{path}")
}

#[tokio::test]
async fn serves_stored_component_as_javascript() {
    let (port, registry, _dir) = start_server().await;
    let source = "/* Greets */\nclass G extends HTMLElement {}";
    registry.create_or_update("greeting-card", source).await.unwrap();

    let response = reqwest::get(url(port, "/components/greeting-card.js"))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/javascript"
    );
    assert_eq!(response.text().await.unwrap(), source);
}

#[tokio::test]
async fn missing_component_gets_js_comment_404() {
    let (port, _registry, _dir) = start_server().await;

    let response = reqwest::get(url(port, "/components/no-such.js")).await.unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/javascript"
    );
    assert_eq!(
        response.text().await.unwrap(),
        "// Component 'no-such' not found"
    );
}

#[tokio::test]
async fn traversal_request_cannot_escape_component_dir() {
    let (port, _registry, _dir) = start_server().await;

    // Encoded slashes keep the traversal inside a single path segment.
    let response = reqwest::get(url(port, "/components/..%2F..%2Fetc%2Fpasswd.js"))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body = response.text().await.unwrap();
    assert!(body.starts_with("// Component '"), "body was: {body}");
    assert!(!body.contains("root:"));
}

#[tokio::test]
async fn bundle_with_no_components_is_placeholder() {
    let (port, _registry, _dir) = start_server().await;

    let response = reqwest::get(url(port, "/components/all.js")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.text().await.unwrap(),
        "// No custom components available"
    );
}

#[tokio::test]
async fn bundle_contains_banner_per_component() {
    let (port, registry, _dir) = start_server().await;
    registry.create_or_update("a-card", "class A {}").await.unwrap();
    registry.create_or_update("b-card", "class B {}").await.unwrap();

    let body = reqwest::get(url(port, "/components/all.js"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.starts_with("// Auto-generated bundle"));
    assert_eq!(body.matches("// === Component:").count(), 2);
    assert!(body.contains("// === Component: a-card ===\nclass A {}"));
    assert!(body.contains("// === Component: b-card ===\nclass B {}"));
}

#[tokio::test]
async fn loader_imports_each_component() {
    let (port, registry, _dir) = start_server().await;
    registry.create_or_update("a-card", "class A {}").await.unwrap();
    registry.create_or_update("b-card", "class B {}").await.unwrap();

    let body = reqwest::get(url(port, "/components/loader.js"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("import '/components/a-card.js';"));
    assert!(body.contains("import '/components/b-card.js';"));
}

#[tokio::test]
async fn loader_with_no_components_is_placeholder() {
    let (port, _registry, _dir) = start_server().await;

    let body = reqwest::get(url(port, "/components/loader.js"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "// No custom components available");
}

#[tokio::test]
async fn api_lists_components_with_tag_and_first_line_description() {
    let (port, registry, _dir) = start_server().await;
    registry
        .create_or_update("weather-card", "// line one\n// line two\nclass W {}")
        .await
        .unwrap();
    registry.create_or_update("plain-card", "class P {}").await.unwrap();

    let entries: Vec<serde_json::Value> = reqwest::get(url(port, "/api/components"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(entries.len(), 2);

    let weather = entries
        .iter()
        .find(|e| e["name"] == "weather-card")
        .unwrap();
    assert_eq!(weather["tag"], "<weather-card></weather-card>");
    // First-line variant: later comment lines are not included.
    assert_eq!(weather["description"], "line one");

    let plain = entries.iter().find(|e| e["name"] == "plain-card").unwrap();
    assert_eq!(plain["description"], "Custom component");
}

#[tokio::test]
async fn api_with_no_components_is_empty_array() {
    let (port, _registry, _dir) = start_server().await;

    let entries: Vec<serde_json::Value> = reqwest::get(url(port, "/api/components"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn health_endpoint() {
    let (port, _registry, _dir) = start_server().await;

    let body: serde_json::Value = reqwest::get(url(port, "/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "widget-host");
}
