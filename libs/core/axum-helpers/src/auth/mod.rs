//! Bearer-token authentication and role checks.
//!
//! - [`JwtAuth`] issues and verifies HS256 access tokens
//! - [`jwt_auth_middleware`] rejects requests without a valid token and
//!   stores the verified [`JwtClaims`] in request extensions
//! - [`require_admin`] rejects authenticated callers whose role is not admin
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware::{from_fn, from_fn_with_state}, routing::post};
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware, require_admin};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! // Layers run bottom-up: verify the token first, then check the role
//! let admin = Router::new()
//!     .route("/employees", post(create))
//!     .route_layer(from_fn(require_admin))
//!     .route_layer(from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{ACCESS_TOKEN_TYPE, ADMIN_ROLE, JwtAuth, JwtClaims};
pub use middleware::{extract_bearer_token, jwt_auth_middleware, require_admin};
