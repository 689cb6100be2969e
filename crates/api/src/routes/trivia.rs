use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{category, question, quiz};
use crate::state::AppState;

/// Trivia API.
///
/// ```text
/// GET    /categories                      id -> type map
/// GET    /categories/{id}/questions       questions of one category (?page=)
/// GET    /category/{id}                   same as above
/// GET    /questions                       paginated questions (?page=)
/// POST   /questions                       search ({searchTerm}) or create
/// DELETE /questions/{id}                  delete
/// POST   /quizzes                         next unseen question
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(category::list_categories))
        .route(
            "/categories/{id}/questions",
            get(category::questions_by_category),
        )
        .route("/category/{id}", get(category::questions_by_category))
        .route(
            "/questions",
            get(question::list_questions).post(question::post_question),
        )
        .route("/questions/{id}", delete(question::delete_question))
        .route("/quizzes", post(quiz::next_question))
}
