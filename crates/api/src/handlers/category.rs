//! Handlers for trivia categories.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use trifold_core::error::CoreError;
use trifold_core::pagination::paginate_strict;
use trifold_core::types::DbId;
use trifold_db::models::category::Category;
use trifold_db::models::question::Question;
use trifold_db::repositories::{CategoryRepo, QuestionRepo};
use trifold_db::DbPool;

use crate::error::AppResult;
use crate::extract::{ApiPath, ApiQuery};
use crate::query::PageParams;
use crate::state::AppState;

/// `{"<id>": "<type>"}` map the trivia client renders its category list from.
pub type CategoryMap = BTreeMap<DbId, String>;

pub fn category_map(categories: Vec<Category>) -> CategoryMap {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

pub async fn load_category_map(pool: &DbPool) -> Result<CategoryMap, sqlx::Error> {
    Ok(category_map(CategoryRepo::list(pool).await?))
}

/// Category of the first question in `questions`, if any.
pub async fn category_of_first(
    pool: &DbPool,
    questions: &[Question],
) -> Result<Option<Category>, sqlx::Error> {
    match questions.first() {
        Some(first) => CategoryRepo::find_by_id(pool, first.category).await,
        None => Ok(None),
    }
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
}

/// Questions of one category, or of a search.
#[derive(Debug, Serialize)]
pub struct ScopedQuestions {
    pub success: bool,
    pub questions: Vec<Question>,
    #[serde(rename = "currentCategory")]
    pub current_category: Option<Category>,
    #[serde(rename = "totalQuestions")]
    pub total_questions: usize,
}

/// GET /categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<CategoriesResponse>> {
    let categories = load_category_map(&state.pool).await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

/// GET /categories/{id}/questions (also `/category/{id}`)
///
/// Unknown category ids are unprocessable rather than missing, since the path
/// itself is a valid route.
pub async fn questions_by_category(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<DbId>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<Json<ScopedQuestions>> {
    let category = CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .ok_or_else(|| CoreError::Unprocessable(format!("no category with id {category_id}")))?;

    let all = QuestionRepo::list_by_category(&state.pool, category_id).await?;
    let questions = paginate_strict(&all, params.page())?.to_vec();

    Ok(Json(ScopedQuestions {
        success: true,
        questions,
        current_category: Some(category),
        total_questions: all.len(),
    }))
}
