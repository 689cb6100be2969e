//! Request handlers, one module per resource.
//!
//! Directory: [`home`], [`venue`], [`artist`], [`show`].
//! Trivia: [`category`], [`question`], [`quiz`].
//! Catalog: [`drink`].

pub mod artist;
pub mod category;
pub mod drink;
pub mod fallback;
pub mod home;
pub mod question;
pub mod quiz;
pub mod show;
pub mod venue;
