mod error;
mod routes;
mod state;

use axum::routing::{get, post};
use axum::Router;
use quotelens_client::{CodeIntel, SearchClient};
use quotelens_core::EntitiesConfig;
use state::{AppState, SharedState};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

fn arg(name: &str) -> Option<String> {
    std::env::args()
        .position(|a| a == name)
        .and_then(|i| std::env::args().nth(i + 1))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let port: u16 = arg("--port").and_then(|p| p.parse().ok()).unwrap_or(7070);
    let bind = arg("--bind").unwrap_or_else(|| "127.0.0.1".to_string());
    let backend_url = arg("--backend-url").unwrap_or_else(|| "http://127.0.0.1:7080".to_string());

    let entities = match arg("--entities") {
        Some(path) => match EntitiesConfig::load(std::path::Path::new(&path)) {
            Ok(entities) => entities,
            Err(err) => {
                eprintln!("Error loading entities config {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => EntitiesConfig::builtin(),
    };

    let intel = CodeIntel::new(entities, SearchClient::new(&backend_url));
    let state: SharedState = Arc::new(AppState::new(intel));

    let app = Router::new()
        .route("/hover", post(routes::hover))
        .route("/literal", post(routes::literal))
        .route("/definitions", post(routes::definitions))
        .route("/references", post(routes::references))
        .route("/implementations", post(routes::implementations))
        .route("/entities", get(routes::entities))
        .route("/status", get(routes::status))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", bind, port);
    tracing::info!("quotelens-service listening on {} (backend {})", addr, backend_url);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
