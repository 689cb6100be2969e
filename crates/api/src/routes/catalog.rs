use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::drink;
use crate::state::AppState;

/// Drink catalog.
///
/// ```text
/// GET    /drinks            short projection (public)
/// POST   /drinks            create              post:drinks
/// GET    /drinks-detail     long projection     get:drinks-detail
/// PATCH  /drinks/{id}       update              patch:drinks
/// DELETE /drinks/{id}       delete              delete:drinks
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/drinks", get(drink::list_drinks).post(drink::create_drink))
        .route("/drinks-detail", get(drink::list_drinks_detail))
        .route(
            "/drinks/{id}",
            patch(drink::update_drink).delete(drink::delete_drink),
        )
}
