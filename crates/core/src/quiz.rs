//! Quiz request interpretation.
//!
//! The quiz client sends the ids it has already shown plus the category it is
//! playing (`{"id": 0}` meaning "all categories"). Both arrive as loosely typed
//! JSON, so they are parsed here into a [`QuizFilter`] before any query runs.

use serde_json::Value;

use crate::error::CoreError;
use crate::types::DbId;

/// Category id the quiz client uses for "all categories".
pub const ALL_CATEGORIES: DbId = 0;

/// Which questions are eligible for the next quiz round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizFilter {
    pub category: Option<DbId>,
    pub exclude: Vec<DbId>,
}

impl QuizFilter {
    /// Build a filter from the raw `previous_questions` and `quiz_category`
    /// body fields.
    pub fn from_request(
        previous_questions: Option<&Value>,
        quiz_category: Option<&Value>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            category: parse_category(quiz_category)?,
            exclude: parse_previous(previous_questions)?,
        })
    }
}

fn parse_previous(value: Option<&Value>) -> Result<Vec<DbId>, CoreError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                parse_id(item).ok_or_else(|| {
                    CoreError::Unprocessable(format!("previous question id {item} is not an id"))
                })
            })
            .collect(),
        Some(other) => Err(CoreError::Unprocessable(format!(
            "previous_questions must be a list of ids, got {other}"
        ))),
    }
}

fn parse_category(value: Option<&Value>) -> Result<Option<DbId>, CoreError> {
    let category = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(map)) => map.get("id").and_then(parse_id).ok_or_else(|| {
            CoreError::Unprocessable("quiz_category must carry an integer id".into())
        })?,
        Some(other) => {
            return Err(CoreError::Unprocessable(format!(
                "quiz_category must be an object, got {other}"
            )))
        }
    };

    Ok((category != ALL_CATEGORIES).then_some(category))
}

/// Accept integer ids and the stringified ids browsers send from object keys.
pub fn parse_id(value: &Value) -> Option<DbId> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
