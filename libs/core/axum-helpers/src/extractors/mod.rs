//! Extractors that validate their payload before the handler runs.
//!
//! Rejections are rendered through [`AppError`](crate::errors::AppError) so
//! they share the standard error envelope.

pub mod validated_json;
pub mod validated_query;

pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
