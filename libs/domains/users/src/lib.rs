//! Users Domain
//!
//! Accounts for the API: registration, password login issuing bearer tokens,
//! and the current-user profile. Passwords are stored as Argon2id hashes.
//!
//! Token verification itself lives in `axum_helpers::auth`, so any domain can
//! guard its routes without depending on this crate.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{CreateUser, LoginRequest, Role, TokenResponse, User, UserResponse};
pub use mongodb::MongoUserRepository;
pub use repository::UserRepository;
pub use service::UserService;
