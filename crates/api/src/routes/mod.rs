pub mod catalog;
pub mod directory;
pub mod health;
pub mod trivia;

use axum::Router;

use crate::state::AppState;

/// Every service's routes, merged at the root.
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(directory::router())
        .merge(trivia::router())
        .merge(catalog::router())
}
