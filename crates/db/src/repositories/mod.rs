//! Repository layer.
//!
//! Each repository is a zero-sized struct. Read methods accept `&DbPool`;
//! write methods accept `&mut DbConn` so the caller decides the transaction
//! scope.

pub mod artist_repo;
pub mod category_repo;
pub mod drink_repo;
pub mod question_repo;
pub mod show_repo;
pub mod venue_repo;

pub use artist_repo::ArtistRepo;
pub use category_repo::CategoryRepo;
pub use drink_repo::DrinkRepo;
pub use question_repo::QuestionRepo;
pub use show_repo::ShowRepo;
pub use venue_repo::VenueRepo;

/// Keep the rows whose `field` contains `term`, ignoring case.
///
/// Matching happens here rather than in SQL: SQLite's `LIKE` and `lower()`
/// only fold ASCII, so `"été"` would miss `"ÉTÉ"`.
pub(crate) fn retain_matching<T>(rows: &mut Vec<T>, term: &str, field: impl Fn(&T) -> &str) {
    let needle = term.to_lowercase();
    rows.retain(|row| field(row).to_lowercase().contains(&needle));
}
