//! Artist entity model.

use serde::Serialize;
use sqlx::FromRow;
use trifold_core::types::DbId;

/// A row from the `artists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Artist {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// `{id, name}` pair for the artist index.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtistName {
    pub id: DbId,
    pub name: String,
}

/// Artist search hit with its upcoming show count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtistListing {
    pub id: DbId,
    pub name: String,
    pub num_upcoming_shows: i64,
}
