//! Trivia question model and insert DTO.

use serde::Serialize;
use sqlx::FromRow;
use trifold_core::types::DbId;

/// A row from the `questions` table. Serialized as-is in every listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub question: String,
    pub answer: String,
    pub category: DbId,
    pub difficulty: i64,
}

/// Input for inserting a question.
///
/// `category` and `difficulty` are optional here so that a missing value is
/// rejected by the schema (NOT NULL) rather than guessed.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: Option<DbId>,
    pub difficulty: Option<i64>,
}
