//! Employees API routes

use axum::Router;
use domain_employees::{EmployeeService, MongoEmployeeRepository, handlers};
use tracing::info;

use crate::state::AppState;

fn repository(state: &AppState) -> MongoEmployeeRepository {
    MongoEmployeeRepository::with_collection(&state.db, &state.config.collections.employees)
}

/// Create the employees router
pub fn router(state: &AppState) -> Router {
    let service = EmployeeService::new(repository(state));
    handlers::router(service, state.jwt.clone())
}

/// Build the employee indexes; the service must not start without them
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    repository(state)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create employee indexes: {}", e))?;
    info!("Employee collection indexes created");
    Ok(())
}
