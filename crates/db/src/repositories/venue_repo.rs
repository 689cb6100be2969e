//! Repository for the `venues` table.

use chrono::Utc;
use trifold_core::forms::VenueForm;
use trifold_core::genres::join_genres;
use trifold_core::types::DbId;

use crate::models::venue::{Venue, VenueListing};
use crate::repositories::retain_matching;
use crate::{DbConn, DbPool};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, city, state, address, phone, genres, image_link, \
     facebook_link, website, seeking_talent, seeking_description";

/// Listing columns; `?1` is the reference time for the upcoming-show count.
const LISTING_COLUMNS: &str = "v.id, v.name, v.city, v.state, \
     (SELECT COUNT(*) FROM shows s WHERE s.venue_id = v.id AND s.start_time > ?1) \
     AS num_upcoming_shows";

/// Provides CRUD and listing queries for venues.
pub struct VenueRepo;

impl VenueRepo {
    /// Insert a venue from a validated form, returning the created row.
    pub async fn create(conn: &mut DbConn, form: &VenueForm) -> Result<Venue, sqlx::Error> {
        let query = format!(
            "INSERT INTO venues (name, city, state, address, phone, genres, image_link,
                                 facebook_link, website, seeking_talent, seeking_description)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Venue>(&query)
            .bind(&form.name)
            .bind(&form.city)
            .bind(&form.state)
            .bind(&form.address)
            .bind(&form.phone)
            .bind(join_genres(&form.genres))
            .bind(&form.image_link)
            .bind(&form.facebook_link)
            .bind(&form.website)
            .bind(form.seeking_talent)
            .bind(&form.seeking_description)
            .fetch_one(&mut *conn)
            .await
    }

    /// Replace every editable field of a venue.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut DbConn,
        id: DbId,
        form: &VenueForm,
    ) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!(
            "UPDATE venues SET
                name = ?, city = ?, state = ?, address = ?, phone = ?, genres = ?,
                image_link = ?, facebook_link = ?, website = ?, seeking_talent = ?,
                seeking_description = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Venue>(&query)
            .bind(&form.name)
            .bind(&form.city)
            .bind(&form.state)
            .bind(&form.address)
            .bind(&form.phone)
            .bind(join_genres(&form.genres))
            .bind(&form.image_link)
            .bind(&form.facebook_link)
            .bind(&form.website)
            .bind(form.seeking_talent)
            .bind(&form.seeking_description)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Find a venue by its ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM venues WHERE id = ?");
        sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All venues ordered by (state, city) with their count of shows
    /// starting strictly after now.
    pub async fn list_by_area(pool: &DbPool) -> Result<Vec<VenueListing>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS} FROM venues v ORDER BY v.state, v.city, v.id"
        );
        sqlx::query_as::<_, VenueListing>(&query)
            .bind(Utc::now())
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search on the venue name, in id order.
    pub async fn search(pool: &DbPool, term: &str) -> Result<Vec<VenueListing>, sqlx::Error> {
        let query = format!("SELECT {LISTING_COLUMNS} FROM venues v ORDER BY v.id");
        let mut venues = sqlx::query_as::<_, VenueListing>(&query)
            .bind(Utc::now())
            .fetch_all(pool)
            .await?;
        retain_matching(&mut venues, term, |v| v.name.as_str());
        Ok(venues)
    }

    /// Delete a venue together with its shows. Returns `true` if the venue
    /// existed. Run inside a transaction so both deletes land or neither.
    pub async fn delete_with_shows(conn: &mut DbConn, id: DbId) -> Result<bool, sqlx::Error> {
        let shows = sqlx::query("DELETE FROM shows WHERE venue_id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        let result = sqlx::query("DELETE FROM venues WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() > 0 {
            tracing::debug!(venue_id = id, shows = shows.rows_affected(), "Venue shows removed");
        }
        Ok(result.rows_affected() > 0)
    }

    /// Total number of venues.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM venues")
            .fetch_one(pool)
            .await
    }
}
