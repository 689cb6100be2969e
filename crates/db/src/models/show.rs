//! Show entity model and the joined projections used by detail pages.

use serde::Serialize;
use sqlx::FromRow;
use trifold_core::types::{DbId, Timestamp};

/// A row from the `shows` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Show {
    pub id: DbId,
    pub start_time: Timestamp,
    pub artist_id: DbId,
    pub venue_id: DbId,
}

/// Which side of "now" a show query selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeline {
    /// `start_time < now`
    Past,
    /// `start_time >= now`
    Upcoming,
}

impl Timeline {
    pub(crate) fn comparison(self) -> &'static str {
        match self {
            Timeline::Past => "<",
            Timeline::Upcoming => ">=",
        }
    }
}

/// A show at a venue, seen from the venue page.
#[derive(Debug, Clone, FromRow)]
pub struct ArtistAppearance {
    pub artist_id: DbId,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: Timestamp,
}

/// A show by an artist, seen from the artist page.
#[derive(Debug, Clone, FromRow)]
pub struct VenueAppearance {
    pub venue_id: DbId,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: Timestamp,
}

/// Entry of the global show listing.
#[derive(Debug, Clone, FromRow)]
pub struct ShowListing {
    pub venue_id: DbId,
    pub venue_name: String,
    pub artist_id: DbId,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: Timestamp,
}
