//! Handlers for the venue pages.
//!
//! Pages render their context as JSON with the session's queued flashes.
//! Form submissions validate first; a rejected form is stashed in the session
//! and the browser is redirected back to the form with one flash per field.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use trifold_core::areas::{group_by_area, Area, LocatedVenue, VenueSummary};
use trifold_core::error::CoreError;
use trifold_core::forms::{flash_lines, form_errors, VenueForm};
use trifold_core::genres::split_genres;
use trifold_core::schedule::format_listing;
use trifold_core::types::DbId;
use trifold_db::models::show::{ArtistAppearance, Timeline};
use trifold_db::models::venue::Venue;
use trifold_db::repositories::{ShowRepo, VenueRepo};
use trifold_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiForm, ApiPath};
use crate::handlers::home::render_home;
use crate::response::{Deleted, Page};
use crate::session::Session;
use crate::state::AppState;

const CREATE_FORM_KEY: &str = "venue_create";

fn edit_form_key(id: DbId) -> String {
    format!("venue_edit:{id}")
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Venue", id })
}

// ---------------------------------------------------------------------------
// Page payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct VenuesPage {
    pub areas: Vec<Area>,
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResults<T: Serialize> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T: Serialize> SearchResults<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VenueSearchPage {
    pub results: SearchResults<VenueSummary>,
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct PastOrUpcomingArtist {
    pub artist_id: DbId,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<ArtistAppearance> for PastOrUpcomingArtist {
    fn from(row: ArtistAppearance) -> Self {
        Self {
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: format_listing(&row.start_time),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VenueDetail {
    pub id: DbId,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<PastOrUpcomingArtist>,
    pub upcoming_shows: Vec<PastOrUpcomingArtist>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Serialize)]
pub struct VenuePage {
    pub venue: VenueDetail,
}

#[derive(Debug, Serialize)]
pub struct VenueFormPage {
    pub form: VenueForm,
    pub errors: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct VenueEditPage {
    pub form: VenueForm,
    pub errors: BTreeMap<String, Vec<String>>,
    pub venue_id: DbId,
}

fn form_from_venue(venue: Venue) -> VenueForm {
    VenueForm {
        name: venue.name,
        city: venue.city,
        state: venue.state,
        address: venue.address,
        phone: venue.phone,
        genres: split_genres(&venue.genres),
        image_link: venue.image_link,
        facebook_link: venue.facebook_link,
        website: venue.website,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
    }
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /venues
///
/// All venues grouped by (city, state) with their upcoming show counts.
pub async fn list_venues(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<impl IntoResponse> {
    let rows = VenueRepo::list_by_area(&state.pool).await?;
    let areas = group_by_area(rows.into_iter().map(LocatedVenue::from));

    let flashes = session.take_flashes().await;
    Ok((session, Json(Page::new(flashes, VenuesPage { areas }))))
}

/// POST /venues/search
///
/// Case-insensitive substring match on the venue name.
pub async fn search_venues(
    State(state): State<AppState>,
    session: Session,
    ApiForm(input): ApiForm<SearchForm>,
) -> AppResult<impl IntoResponse> {
    let rows = VenueRepo::search(&state.pool, &input.search_term).await?;
    let results = SearchResults::new(rows.iter().map(|row| row.summary()).collect());

    let flashes = session.take_flashes().await;
    Ok((
        session,
        Json(Page::new(
            flashes,
            VenueSearchPage {
                results,
                search_term: input.search_term,
            },
        )),
    ))
}

/// GET /venues/{id}
///
/// Venue detail with its shows split at the current time.
pub async fn show_venue(
    State(state): State<AppState>,
    session: Session,
    ApiPath(venue_id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueRepo::find_by_id(&state.pool, venue_id)
        .await?
        .ok_or_else(|| not_found(venue_id))?;

    let past_shows: Vec<PastOrUpcomingArtist> =
        ShowRepo::for_venue(&state.pool, venue_id, Timeline::Past)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
    let upcoming_shows: Vec<PastOrUpcomingArtist> =
        ShowRepo::for_venue(&state.pool, venue_id, Timeline::Upcoming)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

    let venue = VenueDetail {
        id: venue.id,
        name: venue.name,
        genres: split_genres(&venue.genres),
        address: venue.address,
        city: venue.city,
        state: venue.state,
        phone: venue.phone,
        website: venue.website,
        facebook_link: venue.facebook_link,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
        image_link: venue.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    };

    let flashes = session.take_flashes().await;
    Ok((session, Json(Page::new(flashes, VenuePage { venue }))))
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// GET /venues/create
///
/// Blank form, or the last rejected submission with its errors.
pub async fn create_venue_form(session: Session) -> AppResult<impl IntoResponse> {
    let (form, errors) = match session.take_form::<VenueForm>(CREATE_FORM_KEY).await {
        Some(form) => {
            let errors = form_errors(&form);
            (form, errors)
        }
        None => (VenueForm::default(), BTreeMap::new()),
    };

    let flashes = session.take_flashes().await;
    Ok((session, Json(Page::new(flashes, VenueFormPage { form, errors }))))
}

async fn insert_venue(pool: &DbPool, form: &VenueForm) -> Result<Venue, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let venue = VenueRepo::create(&mut tx, form).await?;
    tx.commit().await?;
    Ok(venue)
}

/// POST /venues/create
pub async fn create_venue_submission(
    State(state): State<AppState>,
    session: Session,
    ApiForm(form): ApiForm<VenueForm>,
) -> AppResult<Response> {
    if let Err(errors) = form.validate() {
        session.stash_form(CREATE_FORM_KEY, &form).await;
        for line in flash_lines(&errors) {
            session.flash(line).await;
        }
        return Ok((session, Redirect::to("/venues/create")).into_response());
    }

    match insert_venue(&state.pool, &form).await {
        Ok(venue) => {
            tracing::info!(venue_id = venue.id, name = %venue.name, "Venue created");
            session
                .flash(format!("Venue {} was successfully listed!", venue.name))
                .await;
        }
        Err(err) => {
            tracing::error!(error = %err, name = %form.name, "Venue insert failed");
            session
                .flash(format!(
                    "An error occurred. Venue {} could not be listed.",
                    form.name
                ))
                .await;
        }
    }

    Ok(render_home(session).await.into_response())
}

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

/// GET /venues/{id}/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    session: Session,
    ApiPath(venue_id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueRepo::find_by_id(&state.pool, venue_id)
        .await?
        .ok_or_else(|| not_found(venue_id))?;

    let (form, errors) = match session.take_form::<VenueForm>(&edit_form_key(venue_id)).await {
        Some(form) => {
            let errors = form_errors(&form);
            (form, errors)
        }
        None => (form_from_venue(venue), BTreeMap::new()),
    };

    let flashes = session.take_flashes().await;
    let page = VenueEditPage {
        form,
        errors,
        venue_id,
    };
    Ok((session, Json(Page::new(flashes, page))))
}

async fn update_venue(
    pool: &DbPool,
    venue_id: DbId,
    form: &VenueForm,
) -> Result<Option<Venue>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let venue = VenueRepo::update(&mut tx, venue_id, form).await?;
    tx.commit().await?;
    Ok(venue)
}

/// POST /venues/{id}/edit
pub async fn edit_venue_submission(
    State(state): State<AppState>,
    session: Session,
    ApiPath(venue_id): ApiPath<DbId>,
    ApiForm(form): ApiForm<VenueForm>,
) -> AppResult<Response> {
    if VenueRepo::find_by_id(&state.pool, venue_id).await?.is_none() {
        return Err(not_found(venue_id));
    }

    if let Err(errors) = form.validate() {
        session.stash_form(&edit_form_key(venue_id), &form).await;
        for line in flash_lines(&errors) {
            session.flash(line).await;
        }
        let target = format!("/venues/{venue_id}/edit");
        return Ok((session, Redirect::to(&target)).into_response());
    }

    match update_venue(&state.pool, venue_id, &form).await {
        Ok(Some(venue)) => {
            tracing::info!(venue_id, "Venue updated");
            session
                .flash(format!("Venue {} was successfully updated!", venue.name))
                .await;
        }
        Ok(None) => return Err(not_found(venue_id)),
        Err(err) => {
            tracing::error!(error = %err, venue_id, "Venue update failed");
            session
                .flash(format!(
                    "An error occurred. Venue {} could not be updated.",
                    form.name
                ))
                .await;
        }
    }

    let target = format!("/venues/{venue_id}");
    Ok((session, Redirect::to(&target)).into_response())
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// DELETE /venues/{id}
///
/// Removes the venue and its shows in one transaction.
pub async fn delete_venue(
    State(state): State<AppState>,
    ApiPath(venue_id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    if !VenueRepo::delete_with_shows(&mut tx, venue_id).await? {
        return Err(not_found(venue_id));
    }
    tx.commit().await?;

    tracing::info!(venue_id, "Venue deleted");
    Ok(Json(Deleted::new(venue_id)))
}
