use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{artist, home, show, venue};
use crate::state::AppState;

/// Directory pages.
///
/// ```text
/// GET    /                          home
///
/// GET    /venues                    venues grouped by area
/// POST   /venues/search             search venues by name
/// GET    /venues/create             blank or stashed form
/// POST   /venues/create             submit new venue
/// GET    /venues/{id}               detail with past/upcoming shows
/// DELETE /venues/{id}               delete with shows
/// GET    /venues/{id}/edit          pre-filled form
/// POST   /venues/{id}/edit          submit changes
///
/// (artists mirror venues)
///
/// GET    /shows                     upcoming shows
/// GET    /shows/create              blank or stashed form
/// POST   /shows/create              submit new show
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        // Venues
        .route("/venues", get(venue::list_venues))
        .route("/venues/search", post(venue::search_venues))
        .route(
            "/venues/create",
            get(venue::create_venue_form).post(venue::create_venue_submission),
        )
        .route(
            "/venues/{id}",
            get(venue::show_venue).delete(venue::delete_venue),
        )
        .route(
            "/venues/{id}/edit",
            get(venue::edit_venue_form).post(venue::edit_venue_submission),
        )
        // Artists
        .route("/artists", get(artist::list_artists))
        .route("/artists/search", post(artist::search_artists))
        .route(
            "/artists/create",
            get(artist::create_artist_form).post(artist::create_artist_submission),
        )
        .route(
            "/artists/{id}",
            get(artist::show_artist).delete(artist::delete_artist),
        )
        .route(
            "/artists/{id}/edit",
            get(artist::edit_artist_form).post(artist::edit_artist_submission),
        )
        // Shows
        .route("/shows", get(show::list_shows))
        .route(
            "/shows/create",
            get(show::create_show_form).post(show::create_show_submission),
        )
}
