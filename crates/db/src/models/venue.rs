//! Venue entity model.

use serde::Serialize;
use sqlx::FromRow;
use trifold_core::areas::{LocatedVenue, VenueSummary};
use trifold_core::types::DbId;

/// A row from the `venues` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Venue {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    /// Comma-delimited; split with [`trifold_core::genres::split_genres`].
    pub genres: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Venue with its upcoming show count, as listed on index and search pages.
#[derive(Debug, Clone, FromRow)]
pub struct VenueListing {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

impl VenueListing {
    pub fn summary(&self) -> VenueSummary {
        VenueSummary {
            id: self.id,
            name: self.name.clone(),
            num_upcoming_shows: self.num_upcoming_shows,
        }
    }
}

impl From<VenueListing> for LocatedVenue {
    fn from(row: VenueListing) -> Self {
        LocatedVenue {
            city: row.city,
            state: row.state,
            venue: VenueSummary {
                id: row.id,
                name: row.name,
                num_upcoming_shows: row.num_upcoming_shows,
            },
        }
    }
}
