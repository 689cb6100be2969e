//! Domain logic shared by the repository and HTTP layers.
//!
//! Nothing in this crate touches the database: it holds the error type,
//! pagination and grouping helpers, form validation and the catalog's
//! recipe projections.

pub mod areas;
pub mod error;
pub mod forms;
pub mod genres;
pub mod pagination;
pub mod permissions;
pub mod quiz;
pub mod recipe;
pub mod schedule;
pub mod types;
