//! Grouping of venues into (city, state) areas for the venue index page.

use indexmap::IndexMap;
use serde::Serialize;

use crate::types::DbId;

/// Venue projection used by the index and search pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: DbId,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// A venue together with the location it is grouped under.
#[derive(Debug, Clone)]
pub struct LocatedVenue {
    pub city: String,
    pub state: String,
    pub venue: VenueSummary,
}

/// One bucket of the venue index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Group venues by the literal `(city, state)` pair.
///
/// Buckets appear in the order their key is first seen and venues keep their
/// input order inside a bucket. Keys are compared exactly; "Austin"/"TX" and
/// "austin"/"TX" are different areas.
pub fn group_by_area<I>(venues: I) -> Vec<Area>
where
    I: IntoIterator<Item = LocatedVenue>,
{
    let mut buckets: IndexMap<(String, String), Vec<VenueSummary>> = IndexMap::new();
    for located in venues {
        buckets
            .entry((located.city, located.state))
            .or_default()
            .push(located.venue);
    }

    buckets
        .into_iter()
        .map(|((city, state), venues)| Area {
            city,
            state,
            venues,
        })
        .collect()
}
