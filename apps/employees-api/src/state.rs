//! Application state management.
//!
//! Built once in `main` and handed to the route builders. The MongoDB client
//! is the only store handle; repositories receive it from here.

use axum_helpers::JwtAuth;
use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloning is cheap: the client shares one connection pool and `JwtAuth`
/// holds only the derived keys.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
    /// Token issuing and verification
    pub jwt: JwtAuth,
}
