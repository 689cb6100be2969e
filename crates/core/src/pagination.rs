//! In-memory pagination over pre-fetched, order-stable collections.
//!
//! Queries fetch the full matching set; handlers slice it here. There is no
//! `LIMIT/OFFSET` pushed down to the store.

use crate::error::CoreError;

/// Items per page for every paginated listing.
pub const PAGE_SIZE: usize = 10;

/// Page used when the client does not send `?page=`.
pub const DEFAULT_PAGE: i64 = 1;

/// Half-open index range `[start, end)` of `page` for a collection of `len`
/// items, clipped to the collection. Pages below 1 and pages past the end
/// produce an empty range.
fn page_range(page: i64, per_page: usize, len: usize) -> (usize, usize) {
    let Some(index) = page.checked_sub(1).and_then(|p| usize::try_from(p).ok()) else {
        return (0, 0);
    };
    let Some(start) = index.checked_mul(per_page) else {
        return (0, 0);
    };
    if start >= len {
        return (0, 0);
    }
    (start, start.saturating_add(per_page).min(len))
}

/// Return the slice of `items` that makes up `page` (1-based).
///
/// # Examples
///
/// ```
/// use trifold_core::pagination::paginate;
/// let items: Vec<u32> = (1..=12).collect();
/// assert_eq!(paginate(&items, 1).len(), 10);
/// assert_eq!(paginate(&items, 2), &[11, 12]);
/// assert!(paginate(&items, 3).is_empty());
/// ```
pub fn paginate<T>(items: &[T], page: i64) -> &[T] {
    let (start, end) = page_range(page, PAGE_SIZE, items.len());
    &items[start..end]
}

/// Like [`paginate`], but an empty page of a non-empty collection is an
/// error so the caller can answer 404.
pub fn paginate_strict<T>(items: &[T], page: i64) -> Result<&[T], CoreError> {
    let slice = paginate(items, page);
    if slice.is_empty() && !items.is_empty() {
        return Err(CoreError::PageOutOfRange { page });
    }
    Ok(slice)
}
