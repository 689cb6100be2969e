//! Row structs and read projections.
//!
//! Each submodule contains a `FromRow` entity struct matching the table plus
//! the narrower projections its listing queries return. Write inputs are the
//! validated forms and bodies from `trifold_core`.

pub mod artist;
pub mod category;
pub mod drink;
pub mod question;
pub mod show;
pub mod venue;
