//! Handlers for trivia questions: paginated listing, search, create, delete.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use trifold_core::error::CoreError;
use trifold_core::pagination::paginate_strict;
use trifold_core::quiz::parse_id;
use trifold_core::types::DbId;
use trifold_db::models::category::Category;
use trifold_db::models::question::{NewQuestion, Question};
use trifold_db::repositories::QuestionRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::handlers::category::{
    category_of_first, load_category_map, CategoryMap, ScopedQuestions,
};
use crate::query::PageParams;
use crate::response::Deleted;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub success: bool,
    pub questions: Vec<Question>,
    pub categories: CategoryMap,
    #[serde(rename = "currentCategory")]
    pub current_category: Option<Category>,
    pub total_questions: usize,
}

/// Body of `POST /questions`: a search when `searchTerm` is present,
/// otherwise a new question.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionPost {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<Value>,
    pub difficulty: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct QuestionCreated {
    pub success: bool,
    pub question_id: DbId,
}

/// GET /questions?page=n
///
/// `currentCategory` is the category of the first question on the page.
pub async fn list_questions(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<Json<QuestionPage>> {
    let all = QuestionRepo::list(&state.pool).await?;
    let questions = paginate_strict(&all, params.page())?.to_vec();
    let categories = load_category_map(&state.pool).await?;
    let current_category = category_of_first(&state.pool, &questions).await?;

    Ok(Json(QuestionPage {
        success: true,
        questions,
        categories,
        current_category,
        total_questions: all.len(),
    }))
}

/// POST /questions
pub async fn post_question(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
    ApiJson(body): ApiJson<QuestionPost>,
) -> AppResult<Response> {
    if let Some(term) = body.search_term.as_deref() {
        let found = search_questions(&state, term, params.page()).await?;
        return Ok(found.into_response());
    }
    Ok(create_question(&state, body).await?.into_response())
}

async fn search_questions(
    state: &AppState,
    term: &str,
    page: i64,
) -> AppResult<Json<ScopedQuestions>> {
    let matches = QuestionRepo::search(&state.pool, term).await?;
    let questions = paginate_strict(&matches, page)?.to_vec();

    let current_category = category_of_first(&state.pool, &matches).await?;

    Ok(Json(ScopedQuestions {
        success: true,
        questions,
        current_category,
        total_questions: matches.len(),
    }))
}

/// Read an optional integer field. Absent or null stays `None` so the store
/// rejects it; anything else that is not an integer is unprocessable.
fn optional_int(field: &str, value: Option<&Value>) -> Result<Option<i64>, CoreError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => parse_id(v)
            .map(Some)
            .ok_or_else(|| CoreError::Unprocessable(format!("{field} must be an integer"))),
    }
}

fn required_text(field: &str, value: Option<String>) -> Result<String, CoreError> {
    value
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| CoreError::Validation(format!("{field} is required")))
}

async fn create_question(state: &AppState, body: QuestionPost) -> AppResult<Json<QuestionCreated>> {
    let input = NewQuestion {
        question: required_text("question", body.question)?,
        answer: required_text("answer", body.answer)?,
        category: optional_int("category", body.category.as_ref())?,
        difficulty: optional_int("difficulty", body.difficulty.as_ref())?,
    };

    let mut tx = state.pool.begin().await?;
    let question = QuestionRepo::create(&mut tx, &input).await?;
    tx.commit().await?;

    tracing::info!(question_id = question.id, category = question.category, "Question created");
    Ok(Json(QuestionCreated {
        success: true,
        question_id: question.id,
    }))
}

/// DELETE /questions/{id}
///
/// A missing question is unprocessable, matching the trivia client's
/// expectations.
pub async fn delete_question(
    State(state): State<AppState>,
    ApiPath(question_id): ApiPath<DbId>,
) -> AppResult<Json<Deleted>> {
    let mut tx = state.pool.begin().await?;
    if !QuestionRepo::delete(&mut tx, question_id).await? {
        return Err(AppError::Unprocessable(format!(
            "no question with id {question_id}"
        )));
    }
    tx.commit().await?;

    tracing::info!(question_id, "Question deleted");
    Ok(Json(Deleted::new(question_id)))
}
