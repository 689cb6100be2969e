use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A requested page lies beyond the end of a non-empty collection.
    #[error("Page {page} is out of range")]
    PageOutOfRange { page: i64 },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Input was well-formed but cannot be acted on (malformed filter,
    /// no eligible result, dangling reference).
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
