//! Auth API routes

use axum::Router;
use domain_users::{MongoUserRepository, UserService, handlers};
use tracing::info;

use crate::state::AppState;

fn service(state: &AppState) -> UserService<MongoUserRepository> {
    let repository =
        MongoUserRepository::with_collection(&state.db, &state.config.collections.users);
    UserService::new(repository, state.jwt.clone())
}

/// Create the auth router
pub fn router(state: &AppState) -> Router {
    handlers::router(service(state), state.jwt.clone())
}

/// Build user indexes and create the configured admin if none exists
pub async fn init(state: &AppState) -> eyre::Result<()> {
    let repository =
        MongoUserRepository::with_collection(&state.db, &state.config.collections.users);
    repository
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;
    info!("User collection indexes created");

    if let Some(admin) = &state.config.default_admin {
        let created = service(state)
            .ensure_default_admin(&admin.username, &admin.email, &admin.password)
            .await
            .map_err(|e| eyre::eyre!("Failed to create default admin: {}", e))?;
        if created {
            info!(username = %admin.username, "Default admin created");
        }
    }
    Ok(())
}
