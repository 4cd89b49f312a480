//! HTTP routes for serving components to the chat page.
//!
//! All endpoints are pure reads over the component directory. Missing
//! components get a JS-comment body, so a 404 that slips into a `<script>`
//! tag is still harmless JavaScript.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::describe;
use crate::error::RegistryError;
use crate::registry::ComponentRegistry;
use crate::store::ComponentStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ComponentRegistry>,
}

/// Build the Axum router for the component asset surface.
pub fn component_routes(registry: Arc<ComponentRegistry>) -> Router {
    Router::new()
        .route("/components/all.js", get(serve_bundle))
        .route("/components/loader.js", get(serve_loader))
        .route("/components/{file}", get(serve_component))
        .route("/api/components", get(list_components))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(AppState { registry })
}

/// Respond with a JavaScript body.
fn js_response(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/javascript")],
        body,
    )
        .into_response()
}

fn not_found_comment(name: &str) -> Response {
    js_response(
        StatusCode::NOT_FOUND,
        format!("// Component '{name}' not found"),
    )
}

// ── Health ──────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "widget-host"
    }))
}

// ── GET /components/{name}.js ───────────────────────────────────────

/// Serve a single component's source.
async fn serve_component(Path(file): Path<String>, State(state): State<AppState>) -> Response {
    let file = ComponentStore::sanitize(&file);
    let Some(name) = file.strip_suffix(".js") else {
        return not_found_comment(&file);
    };

    match state.registry.read(name).await {
        Ok(component) => js_response(StatusCode::OK, component.source),
        Err(RegistryError::NotFound { name }) => not_found_comment(&name),
        Err(e) => {
            error!(component = %name, error = %e, "Failed to serve component");
            js_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("// Error loading component '{name}'"),
            )
        }
    }
}

// ── GET /components/all.js ──────────────────────────────────────────

/// Serve every component concatenated into a single bundle.
async fn serve_bundle(State(state): State<AppState>) -> Response {
    let names = match state.registry.store().list_names().await {
        Ok(names) => names,
        Err(e) => {
            error!(error = %e, "Failed to list components for bundle");
            Vec::new()
        }
    };

    if names.is_empty() {
        return js_response(StatusCode::OK, "// No custom components available".to_string());
    }

    let mut content = String::from("// Auto-generated bundle of all custom UI components\n");
    content.push_str(&format!(
        "// Components from {}\n\n",
        state.registry.store().root().display()
    ));

    for name in &names {
        match state.registry.store().read(name).await {
            Ok(source) => {
                content.push_str(&format!("// === Component: {name} ===\n"));
                content.push_str(&source);
                content.push_str("\n\n");
            }
            Err(e) => {
                content.push_str(&format!("// Error loading {name}: {e}\n\n"));
            }
        }
    }

    js_response(StatusCode::OK, content)
}

// ── GET /components/loader.js ───────────────────────────────────────

/// Serve a loader module that imports each component individually.
async fn serve_loader(State(state): State<AppState>) -> Response {
    let names = match state.registry.store().list_names().await {
        Ok(names) => names,
        Err(e) => {
            error!(error = %e, "Failed to list components for loader");
            Vec::new()
        }
    };

    if names.is_empty() {
        return js_response(StatusCode::OK, "// No custom components available".to_string());
    }

    let mut content = String::from("// Auto-generated loader for custom UI components\n\n");
    for name in &names {
        content.push_str(&format!("import '/components/{name}.js';\n"));
    }

    js_response(StatusCode::OK, content)
}

// ── GET /api/components ─────────────────────────────────────────────

/// A component entry in the JSON listing.
#[derive(Debug, Serialize)]
struct ComponentEntry {
    name: String,
    tag: String,
    description: String,
}

/// List available components as JSON.
///
/// Descriptions use the first-line extractor here; the richer multi-line
/// extraction is reserved for the registry listing.
async fn list_components(State(state): State<AppState>) -> Response {
    let names = match state.registry.store().list_names().await {
        Ok(names) => names,
        Err(e) => {
            error!(error = %e, "Failed to list components");
            Vec::new()
        }
    };

    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        // Read failures still yield an entry with the default description.
        let desc = match state.registry.store().read(&name).await {
            Ok(source) => describe::description_first_line(&source),
            Err(_) => String::new(),
        };
        entries.push(ComponentEntry {
            tag: format!("<{name}></{name}>"),
            description: describe::or_default(desc),
            name,
        });
    }

    Json(entries).into_response()
}

/// Serve the component routes on the given listener until shutdown.
pub async fn serve(
    listener: tokio::net::TcpListener,
    registry: Arc<ComponentRegistry>,
) -> std::io::Result<()> {
    let app = component_routes(registry);
    info!(addr = %listener.local_addr()?, "Component asset server started");
    axum::serve(listener, app).await
}
