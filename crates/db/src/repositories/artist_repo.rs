//! Repository for the `artists` table.

use chrono::Utc;
use trifold_core::forms::ArtistForm;
use trifold_core::genres::join_genres;
use trifold_core::types::DbId;

use crate::models::artist::{Artist, ArtistListing, ArtistName};
use crate::repositories::retain_matching;
use crate::{DbConn, DbPool};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, city, state, phone, genres, image_link, facebook_link, \
     website, seeking_venue, seeking_description";

/// Provides CRUD and listing queries for artists.
pub struct ArtistRepo;

impl ArtistRepo {
    /// Insert an artist from a validated form, returning the created row.
    pub async fn create(conn: &mut DbConn, form: &ArtistForm) -> Result<Artist, sqlx::Error> {
        let query = format!(
            "INSERT INTO artists (name, city, state, phone, genres, image_link, facebook_link,
                                  website, seeking_venue, seeking_description)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artist>(&query)
            .bind(&form.name)
            .bind(&form.city)
            .bind(&form.state)
            .bind(&form.phone)
            .bind(join_genres(&form.genres))
            .bind(&form.image_link)
            .bind(&form.facebook_link)
            .bind(&form.website)
            .bind(form.seeking_venue)
            .bind(&form.seeking_description)
            .fetch_one(&mut *conn)
            .await
    }

    /// Replace every editable field of an artist.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut DbConn,
        id: DbId,
        form: &ArtistForm,
    ) -> Result<Option<Artist>, sqlx::Error> {
        let query = format!(
            "UPDATE artists SET
                name = ?, city = ?, state = ?, phone = ?, genres = ?, image_link = ?,
                facebook_link = ?, website = ?, seeking_venue = ?, seeking_description = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artist>(&query)
            .bind(&form.name)
            .bind(&form.city)
            .bind(&form.state)
            .bind(&form.phone)
            .bind(join_genres(&form.genres))
            .bind(&form.image_link)
            .bind(&form.facebook_link)
            .bind(&form.website)
            .bind(form.seeking_venue)
            .bind(&form.seeking_description)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Find an artist by its ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Artist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artists WHERE id = ?");
        sqlx::query_as::<_, Artist>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// `{id, name}` of every artist, in id order.
    pub async fn list_names(pool: &DbPool) -> Result<Vec<ArtistName>, sqlx::Error> {
        sqlx::query_as::<_, ArtistName>("SELECT id, name FROM artists ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search on the artist name, in id order.
    pub async fn search(pool: &DbPool, term: &str) -> Result<Vec<ArtistListing>, sqlx::Error> {
        let mut artists = sqlx::query_as::<_, ArtistListing>(
            "SELECT a.id, a.name,
                    (SELECT COUNT(*) FROM shows s
                      WHERE s.artist_id = a.id AND s.start_time > ?1) AS num_upcoming_shows
             FROM artists a
             ORDER BY a.id",
        )
        .bind(Utc::now())
        .fetch_all(pool)
        .await?;
        retain_matching(&mut artists, term, |a| a.name.as_str());
        Ok(artists)
    }

    /// Delete an artist together with its shows. Returns `true` if the
    /// artist existed.
    pub async fn delete_with_shows(conn: &mut DbConn, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query("DELETE FROM shows WHERE artist_id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        let result = sqlx::query("DELETE FROM artists WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
