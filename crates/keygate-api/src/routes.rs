//! Route definitions
//!
//! `/logout` stays on the public router on purpose: it records the
//! presented token without verifying it, so it must not sit behind the
//! gate.

use crate::auth::middleware::auth_middleware;
use crate::handlers::{auth, health};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    // Public routes (no gate)
    let public_routes = Router::new()
        .route("/register", post(auth::register_handler))
        .route("/login", post(auth::login_handler))
        .route("/logout", get(auth::logout_handler))
        .route("/health", get(health::health_handler));

    // Protected routes behind the gate
    let protected_routes = Router::new()
        .route("/auth", get(auth::auth_probe_handler))
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new().merge(public_routes).merge(protected_routes)
}
