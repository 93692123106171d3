use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// Server error code for a unique index violation
const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("Employee ID '{0}' already exists")]
    Conflict(String),

    #[error("Employee with ID '{0}' not found")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type EmployeeResult<T> = Result<T, EmployeeError>;

impl From<EmployeeError> for AppError {
    fn from(err: EmployeeError) -> Self {
        match err {
            EmployeeError::Conflict(_) => AppError::Conflict(err.to_string()),
            EmployeeError::NotFound(_) => AppError::NotFound(err.to_string()),
            EmployeeError::InvalidArgument(msg) => AppError::BadRequest(msg),
            EmployeeError::Internal(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for EmployeeError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for EmployeeError {
    fn from(err: mongodb::error::Error) -> Self {
        EmployeeError::Internal(err.to_string())
    }
}

/// True when the server rejected a write because of a unique index
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}
