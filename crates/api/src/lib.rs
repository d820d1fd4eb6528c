//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for rate listing and conversion
//! - The shared application state
//!
//! It depends only on the core [`RateStore`] interface; the server binary
//! injects the database-backed store, tests inject the in-memory one.

pub mod routes;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use florin_core::currency::RateStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Rate store the handlers read from.
    pub store: Arc<dyn RateStore>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
