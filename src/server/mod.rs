mod handlers;
mod state;

use axum::routing::{get, post};
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::locality::LocalityResolver;

pub fn build_router(resolver: LocalityResolver) -> Router {
    let state = Arc::new(AppState { resolver });

    Router::new()
        .route("/api/localities", get(handlers::localities))
        .route("/api/representatives", get(handlers::representatives))
        .route("/api/dataset", get(handlers::dataset_info))
        .route("/api/reload", post(handlers::reload))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(resolver: LocalityResolver, host: &str, port: u16) {
    let app = build_router(resolver);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    eprintln!("  Ward Atlas server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    });
}
