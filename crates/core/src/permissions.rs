//! Permission strings the drink catalog checks in the `permissions` claim.
//!
//! These must match the permissions configured at the identity provider.

pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
pub const POST_DRINKS: &str = "post:drinks";
pub const PATCH_DRINKS: &str = "patch:drinks";
pub const DELETE_DRINKS: &str = "delete:drinks";
