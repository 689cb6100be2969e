//! Repository for the `shows` table and its joins.
//!
//! "Now" is read immediately before each query, so the past and upcoming
//! halves of a detail page are two independent snapshots.

use chrono::Utc;
use trifold_core::forms::ShowSubmission;
use trifold_core::types::DbId;

use crate::models::show::{ArtistAppearance, Show, ShowListing, Timeline, VenueAppearance};
use crate::{DbConn, DbPool};

const COLUMNS: &str = "id, start_time, artist_id, venue_id";

/// Provides show inserts and the show joins used by listing pages.
pub struct ShowRepo;

impl ShowRepo {
    /// Insert a show. Fails with a foreign-key violation if the artist or
    /// venue does not exist.
    pub async fn create(conn: &mut DbConn, input: &ShowSubmission) -> Result<Show, sqlx::Error> {
        let query = format!(
            "INSERT INTO shows (start_time, artist_id, venue_id)
             VALUES (?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Show>(&query)
            .bind(input.start_time)
            .bind(input.artist_id)
            .bind(input.venue_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Shows starting now or later, with venue and artist names, earliest
    /// first.
    pub async fn list_upcoming(pool: &DbPool) -> Result<Vec<ShowListing>, sqlx::Error> {
        sqlx::query_as::<_, ShowListing>(
            "SELECT v.id AS venue_id, v.name AS venue_name,
                    a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
                    s.start_time
             FROM shows s
             JOIN venues v ON v.id = s.venue_id
             JOIN artists a ON a.id = s.artist_id
             WHERE s.start_time >= ?
             ORDER BY s.start_time, s.id",
        )
        .bind(Utc::now())
        .fetch_all(pool)
        .await
    }

    /// Shows at a venue on one side of now, joined with their artists.
    pub async fn for_venue(
        pool: &DbPool,
        venue_id: DbId,
        timeline: Timeline,
    ) -> Result<Vec<ArtistAppearance>, sqlx::Error> {
        let query = format!(
            "SELECT a.id AS artist_id, a.name AS artist_name,
                    a.image_link AS artist_image_link, s.start_time
             FROM shows s
             JOIN artists a ON a.id = s.artist_id
             WHERE s.venue_id = ? AND s.start_time {} ?
             ORDER BY s.start_time, s.id",
            timeline.comparison()
        );
        sqlx::query_as::<_, ArtistAppearance>(&query)
            .bind(venue_id)
            .bind(Utc::now())
            .fetch_all(pool)
            .await
    }

    /// Shows by an artist on one side of now, joined with their venues.
    pub async fn for_artist(
        pool: &DbPool,
        artist_id: DbId,
        timeline: Timeline,
    ) -> Result<Vec<VenueAppearance>, sqlx::Error> {
        let query = format!(
            "SELECT v.id AS venue_id, v.name AS venue_name,
                    v.image_link AS venue_image_link, s.start_time
             FROM shows s
             JOIN venues v ON v.id = s.venue_id
             WHERE s.artist_id = ? AND s.start_time {} ?
             ORDER BY s.start_time, s.id",
            timeline.comparison()
        );
        sqlx::query_as::<_, VenueAppearance>(&query)
            .bind(artist_id)
            .bind(Utc::now())
            .fetch_all(pool)
            .await
    }
}
