//! Query-string extractor with validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserializes the query string into `T` and runs its `Validate` rules.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct Paging {
///     #[validate(range(min = 1))]
///     page: u64,
/// }
///
/// async fn list(ValidatedQuery(paging): ValidatedQuery<Paging>) { /* ... */ }
/// ```
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request_parts(parts, state).await?;
        data.validate()?;
        Ok(ValidatedQuery(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, extract::Request, http::StatusCode, routing::get};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Paging {
        #[validate(range(min = 1))]
        #[serde(default = "one")]
        page: u64,
        #[validate(range(min = 1, max = 100))]
        #[serde(default = "ten")]
        limit: u64,
    }

    fn one() -> u64 {
        1
    }

    fn ten() -> u64 {
        10
    }

    async fn handler(ValidatedQuery(paging): ValidatedQuery<Paging>) -> String {
        format!("{}:{}", paging.page, paging.limit)
    }

    async fn status_for(uri: &str) -> StatusCode {
        let app = Router::new().route("/", get(handler));
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_defaults_apply() {
        assert_eq!(status_for("/").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_range_violations_are_rejected() {
        assert_eq!(status_for("/?page=0").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/?limit=101").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/?limit=100").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unparseable_value_is_rejected() {
        assert_eq!(status_for("/?page=first").await, StatusCode::BAD_REQUEST);
    }
}
