//! Keygate API - credential and token lifecycle REST service
//!
//! Registers users, authenticates them, issues signed access/refresh
//! tokens, verifies access tokens on protected requests, and records
//! explicit revocations at logout.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod store;

use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the full application router over the given state.
pub fn create_router(state: Arc<AppState>) -> Router {
    routes::api_routes(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub use state::AppState;
