//! API routes module
//!
//! Wires the domain crates to HTTP routes.

pub mod auth;
pub mod employees;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/employees", employees::router(state))
        .nest("/auth", auth::router(state))
}
