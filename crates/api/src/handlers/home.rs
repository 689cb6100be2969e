use axum::Json;

use crate::response::{Empty, Page};
use crate::session::Session;

/// Render the home page, consuming the session's flashes.
///
/// Successful create submissions land here directly rather than redirecting.
pub async fn render_home(session: Session) -> (Session, Json<Page<Empty>>) {
    let flashes = session.take_flashes().await;
    (session, Json(Page::new(flashes, Empty {})))
}

/// GET /
pub async fn index(session: Session) -> (Session, Json<Page<Empty>>) {
    render_home(session).await
}
