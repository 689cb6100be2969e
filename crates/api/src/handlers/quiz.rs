use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use trifold_core::error::CoreError;
use trifold_core::quiz::QuizFilter;
use trifold_db::models::question::Question;
use trifold_db::repositories::QuestionRepo;

use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Raw quiz request. Both fields are loosely typed on the wire and parsed by
/// [`QuizFilter::from_request`].
#[derive(Debug, Default, Deserialize)]
pub struct QuizRequest {
    pub previous_questions: Option<Value>,
    pub quiz_category: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Question,
}

/// POST /quizzes
///
/// The next question not yet asked, optionally within one category.
pub async fn next_question(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<QuizRequest>,
) -> AppResult<Json<QuizResponse>> {
    let filter =
        QuizFilter::from_request(body.previous_questions.as_ref(), body.quiz_category.as_ref())?;

    let question = QuestionRepo::next_for_quiz(&state.pool, &filter)
        .await?
        .ok_or_else(|| CoreError::Unprocessable("no eligible question left".into()))?;

    tracing::debug!(
        question_id = question.id,
        excluded = filter.exclude.len(),
        "Quiz question selected"
    );
    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}
