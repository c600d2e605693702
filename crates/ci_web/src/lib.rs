use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

/// Largest accepted upload.
pub const UPLOAD_LIMIT_BYTES: usize = 200 * 1024 * 1024;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/sessions", post(handlers::open_session))
        .route("/api/sessions/:session", delete(handlers::close_session))
        .route("/api/sessions/:session/status", get(handlers::status))
        .route("/api/sessions/:session/upload", post(handlers::upload))
        .route("/api/sessions/:session/filters", get(handlers::filters))
        .route("/api/sessions/:session/summary", get(handlers::major_moves))
        .route("/api/sessions/:session/competitors/:name", get(handlers::competitor_profile))
        .route("/api/sessions/:session/business-units/:name", get(handlers::business_unit_profile))
        .route("/api/sessions/:session/articles", get(handlers::industry_updates))
        .layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, state: AppState) -> ci_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Dashboard API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use ci_core::{Error, Result};
}
