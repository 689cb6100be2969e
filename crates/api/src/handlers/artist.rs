//! Handlers for the artist pages. Same flow as the venue pages.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;
use trifold_core::error::CoreError;
use trifold_core::forms::{flash_lines, form_errors, ArtistForm};
use trifold_core::genres::split_genres;
use trifold_core::schedule::format_listing;
use trifold_core::types::DbId;
use trifold_db::models::artist::{Artist, ArtistListing, ArtistName};
use trifold_db::models::show::{Timeline, VenueAppearance};
use trifold_db::repositories::{ArtistRepo, ShowRepo};
use trifold_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiForm, ApiPath};
use crate::handlers::home::render_home;
use crate::handlers::venue::{SearchForm, SearchResults};
use crate::response::{Deleted, Page};
use crate::session::Session;
use crate::state::AppState;

const CREATE_FORM_KEY: &str = "artist_create";

fn edit_form_key(id: DbId) -> String {
    format!("artist_edit:{id}")
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Artist",
        id,
    })
}

#[derive(Debug, Serialize)]
pub struct ArtistsPage {
    pub artists: Vec<ArtistName>,
}

#[derive(Debug, Serialize)]
pub struct ArtistSearchPage {
    pub results: SearchResults<ArtistListing>,
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct PastOrUpcomingVenue {
    pub venue_id: DbId,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

impl From<VenueAppearance> for PastOrUpcomingVenue {
    fn from(row: VenueAppearance) -> Self {
        Self {
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            venue_image_link: row.venue_image_link,
            start_time: format_listing(&row.start_time),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArtistDetail {
    pub id: DbId,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<PastOrUpcomingVenue>,
    pub upcoming_shows: Vec<PastOrUpcomingVenue>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ArtistPage {
    pub artist: ArtistDetail,
}

#[derive(Debug, Serialize)]
pub struct ArtistFormPage {
    pub form: ArtistForm,
    pub errors: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ArtistEditPage {
    pub form: ArtistForm,
    pub errors: BTreeMap<String, Vec<String>>,
    pub artist_id: DbId,
}

fn form_from_artist(artist: Artist) -> ArtistForm {
    ArtistForm {
        name: artist.name,
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        genres: split_genres(&artist.genres),
        image_link: artist.image_link,
        facebook_link: artist.facebook_link,
        website: artist.website,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
    }
}

/// GET /artists
pub async fn list_artists(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<impl IntoResponse> {
    let artists = ArtistRepo::list_names(&state.pool).await?;
    let flashes = session.take_flashes().await;
    Ok((session, Json(Page::new(flashes, ArtistsPage { artists }))))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    session: Session,
    ApiForm(input): ApiForm<SearchForm>,
) -> AppResult<impl IntoResponse> {
    let results = SearchResults::new(ArtistRepo::search(&state.pool, &input.search_term).await?);

    let flashes = session.take_flashes().await;
    Ok((
        session,
        Json(Page::new(
            flashes,
            ArtistSearchPage {
                results,
                search_term: input.search_term,
            },
        )),
    ))
}

/// GET /artists/{id}
pub async fn show_artist(
    State(state): State<AppState>,
    session: Session,
    ApiPath(artist_id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let artist = ArtistRepo::find_by_id(&state.pool, artist_id)
        .await?
        .ok_or_else(|| not_found(artist_id))?;

    let past_shows: Vec<PastOrUpcomingVenue> =
        ShowRepo::for_artist(&state.pool, artist_id, Timeline::Past)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
    let upcoming_shows: Vec<PastOrUpcomingVenue> =
        ShowRepo::for_artist(&state.pool, artist_id, Timeline::Upcoming)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

    let artist = ArtistDetail {
        id: artist.id,
        name: artist.name,
        genres: split_genres(&artist.genres),
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        website: artist.website,
        facebook_link: artist.facebook_link,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
        image_link: artist.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    };

    let flashes = session.take_flashes().await;
    Ok((session, Json(Page::new(flashes, ArtistPage { artist }))))
}

/// GET /artists/create
pub async fn create_artist_form(session: Session) -> AppResult<impl IntoResponse> {
    let (form, errors) = match session.take_form::<ArtistForm>(CREATE_FORM_KEY).await {
        Some(form) => {
            let errors = form_errors(&form);
            (form, errors)
        }
        None => (ArtistForm::default(), BTreeMap::new()),
    };

    let flashes = session.take_flashes().await;
    Ok((session, Json(Page::new(flashes, ArtistFormPage { form, errors }))))
}

async fn insert_artist(pool: &DbPool, form: &ArtistForm) -> Result<Artist, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let artist = ArtistRepo::create(&mut tx, form).await?;
    tx.commit().await?;
    Ok(artist)
}

/// POST /artists/create
pub async fn create_artist_submission(
    State(state): State<AppState>,
    session: Session,
    ApiForm(form): ApiForm<ArtistForm>,
) -> AppResult<Response> {
    if let Err(errors) = form.validate() {
        session.stash_form(CREATE_FORM_KEY, &form).await;
        for line in flash_lines(&errors) {
            session.flash(line).await;
        }
        return Ok((session, Redirect::to("/artists/create")).into_response());
    }

    match insert_artist(&state.pool, &form).await {
        Ok(artist) => {
            tracing::info!(artist_id = artist.id, name = %artist.name, "Artist created");
            session
                .flash(format!("Artist {} was successfully listed!", artist.name))
                .await;
        }
        Err(err) => {
            tracing::error!(error = %err, name = %form.name, "Artist insert failed");
            session
                .flash(format!(
                    "An error occurred. Artist {} could not be listed.",
                    form.name
                ))
                .await;
        }
    }

    Ok(render_home(session).await.into_response())
}

/// GET /artists/{id}/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    session: Session,
    ApiPath(artist_id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let artist = ArtistRepo::find_by_id(&state.pool, artist_id)
        .await?
        .ok_or_else(|| not_found(artist_id))?;

    let (form, errors) = match session.take_form::<ArtistForm>(&edit_form_key(artist_id)).await {
        Some(form) => {
            let errors = form_errors(&form);
            (form, errors)
        }
        None => (form_from_artist(artist), BTreeMap::new()),
    };

    let flashes = session.take_flashes().await;
    let page = ArtistEditPage {
        form,
        errors,
        artist_id,
    };
    Ok((session, Json(Page::new(flashes, page))))
}

async fn update_artist(
    pool: &DbPool,
    artist_id: DbId,
    form: &ArtistForm,
) -> Result<Option<Artist>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let artist = ArtistRepo::update(&mut tx, artist_id, form).await?;
    tx.commit().await?;
    Ok(artist)
}

/// POST /artists/{id}/edit
pub async fn edit_artist_submission(
    State(state): State<AppState>,
    session: Session,
    ApiPath(artist_id): ApiPath<DbId>,
    ApiForm(form): ApiForm<ArtistForm>,
) -> AppResult<Response> {
    if ArtistRepo::find_by_id(&state.pool, artist_id).await?.is_none() {
        return Err(not_found(artist_id));
    }

    if let Err(errors) = form.validate() {
        session.stash_form(&edit_form_key(artist_id), &form).await;
        for line in flash_lines(&errors) {
            session.flash(line).await;
        }
        let target = format!("/artists/{artist_id}/edit");
        return Ok((session, Redirect::to(&target)).into_response());
    }

    match update_artist(&state.pool, artist_id, &form).await {
        Ok(Some(artist)) => {
            tracing::info!(artist_id, "Artist updated");
            session
                .flash(format!("Artist {} was successfully updated!", artist.name))
                .await;
        }
        Ok(None) => return Err(not_found(artist_id)),
        Err(err) => {
            tracing::error!(error = %err, artist_id, "Artist update failed");
            session
                .flash(format!(
                    "An error occurred. Artist {} could not be updated.",
                    form.name
                ))
                .await;
        }
    }

    let target = format!("/artists/{artist_id}");
    Ok((session, Redirect::to(&target)).into_response())
}

/// DELETE /artists/{id}
///
/// Removes the artist and its shows in one transaction.
pub async fn delete_artist(
    State(state): State<AppState>,
    ApiPath(artist_id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    if !ArtistRepo::delete_with_shows(&mut tx, artist_id).await? {
        return Err(not_found(artist_id));
    }
    tx.commit().await?;

    tracing::info!(artist_id, "Artist deleted");
    Ok(Json(Deleted::new(artist_id)))
}
