//! Trivia category model.

use serde::Serialize;
use sqlx::FromRow;
use trifold_core::types::DbId;

/// A row from the `categories` table, serialized as `{id, type}`.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct Category {
    pub id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
}
