//! Shared response shapes.
//!
//! Directory pages wrap their context in [`Page`] so every render carries the
//! flash messages it consumed. JSON services reply with `success: true` plus
//! named fields, built by each handler's own payload struct.

use serde::Serialize;

/// A rendered directory page: queued flashes plus the page context.
///
/// ```ignore
/// Ok((session, Json(Page::new(flashes, VenuesPage { areas }))))
/// ```
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub flashes: Vec<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> Page<T> {
    pub fn new(flashes: Vec<String>, data: T) -> Self {
        Self { flashes, data }
    }
}

/// Context of a page that has nothing but flashes (the home page).
#[derive(Debug, Serialize)]
pub struct Empty {}

/// `{ "success": true, "deleted": id }`
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub success: bool,
    pub deleted: trifold_core::types::DbId,
}

impl Deleted {
    pub fn new(deleted: trifold_core::types::DbId) -> Self {
        Self {
            success: true,
            deleted,
        }
    }
}
