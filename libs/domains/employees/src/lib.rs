//! Employees Domain
//!
//! Employee records stored in MongoDB, with paginated listing, exact skill
//! search and per-department salary averages.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, auth layers, audit events
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Query translation, logging
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Record, write/patch forms, query params
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_employees::{handlers, EmployeeService, MongoEmployeeRepository};
//!
//! # async fn example(db: mongodb::Database) -> Result<(), Box<dyn std::error::Error>> {
//! let repository = MongoEmployeeRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let auth = JwtAuth::new(&JwtConfig::new("a-secret-that-is-at-least-32-bytes!!")?);
//! let router = handlers::router(EmployeeService::new(repository), auth);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod indexes;
pub mod models;
pub mod mongodb;
pub mod query;
pub mod repository;
pub mod service;

pub use error::{EmployeeError, EmployeeResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateEmployee, DepartmentSalary, Employee, ListEmployeesQuery, MessageResponse, SkillQuery,
    UpdateEmployee, UpdateOutcome,
};
pub use mongodb::MongoEmployeeRepository;
pub use query::PageRequest;
pub use repository::EmployeeRepository;
pub use service::EmployeeService;
