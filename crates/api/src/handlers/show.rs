//! Handlers for the show listing and show creation.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;
use trifold_core::forms::{flash_lines, ShowForm, ShowSubmission};
use trifold_core::schedule::format_iso;
use trifold_core::types::DbId;
use trifold_db::models::show::{Show, ShowListing};
use trifold_db::repositories::ShowRepo;
use trifold_db::DbPool;

use crate::error::AppResult;
use crate::extract::ApiForm;
use crate::handlers::home::render_home;
use crate::response::Page;
use crate::session::Session;
use crate::state::AppState;

const CREATE_FORM_KEY: &str = "show_create";

#[derive(Debug, Serialize)]
pub struct ShowEntry {
    pub venue_id: DbId,
    pub venue_name: String,
    pub artist_id: DbId,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<ShowListing> for ShowEntry {
    fn from(row: ShowListing) -> Self {
        Self {
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: format_iso(&row.start_time),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShowsPage {
    pub shows: Vec<ShowEntry>,
}

#[derive(Debug, Serialize)]
pub struct ShowFormPage {
    pub form: ShowForm,
}

/// GET /shows
///
/// Upcoming shows in start-time order.
pub async fn list_shows(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<impl IntoResponse> {
    let shows = ShowRepo::list_upcoming(&state.pool)
        .await?
        .into_iter()
        .map(ShowEntry::from)
        .collect();

    let flashes = session.take_flashes().await;
    Ok((session, Json(Page::new(flashes, ShowsPage { shows }))))
}

/// GET /shows/create
pub async fn create_show_form(session: Session) -> AppResult<impl IntoResponse> {
    let form = session
        .take_form::<ShowForm>(CREATE_FORM_KEY)
        .await
        .unwrap_or_default();

    let flashes = session.take_flashes().await;
    Ok((session, Json(Page::new(flashes, ShowFormPage { form }))))
}

async fn insert_show(pool: &DbPool, submission: &ShowSubmission) -> Result<Show, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let show = ShowRepo::create(&mut tx, submission).await?;
    tx.commit().await?;
    Ok(show)
}

/// POST /shows/create
///
/// A show naming a missing artist or venue fails on the foreign key and is
/// reported as an error flash.
pub async fn create_show_submission(
    State(state): State<AppState>,
    session: Session,
    ApiForm(form): ApiForm<ShowForm>,
) -> AppResult<Response> {
    let submission = match form.submission() {
        Ok(submission) => submission,
        Err(errors) => {
            session.stash_form(CREATE_FORM_KEY, &form).await;
            for line in flash_lines(&errors) {
                session.flash(line).await;
            }
            return Ok((session, Redirect::to("/shows/create")).into_response());
        }
    };

    match insert_show(&state.pool, &submission).await {
        Ok(show) => {
            tracing::info!(
                show_id = show.id,
                artist_id = show.artist_id,
                venue_id = show.venue_id,
                "Show created"
            );
            session.flash("Requested show was successfully listed").await;
        }
        Err(err) => {
            tracing::error!(error = %err, "Show insert failed");
            session
                .flash("An error occurred. Requested show could not be listed.")
                .await;
        }
    }

    Ok(render_home(session).await.into_response())
}
