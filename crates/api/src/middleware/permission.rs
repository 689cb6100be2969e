//! Permission-gated extractor for the drink catalog.
//!
//! [`Authorized<P>`] reads the bearer token, verifies it, and checks that its
//! `permissions` claim grants `P::PERMISSION`. Handlers that take it can only
//! run for callers holding that permission.

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use trifold_core::permissions;

use crate::auth::jwt::{verify_token, Claims};
use crate::auth::AuthError;
use crate::error::AppError;
use crate::state::AppState;

/// A permission string a route requires.
pub trait Permission {
    const PERMISSION: &'static str;
}

macro_rules! permission {
    ($name:ident, $value:path) => {
        pub struct $name;

        impl Permission for $name {
            const PERMISSION: &'static str = $value;
        }
    };
}

permission!(GetDrinksDetail, permissions::GET_DRINKS_DETAIL);
permission!(PostDrinks, permissions::POST_DRINKS);
permission!(PatchDrinks, permissions::PATCH_DRINKS);
permission!(DeleteDrinks, permissions::DELETE_DRINKS);

/// Verified claims of a caller holding permission `P`.
///
/// ```ignore
/// async fn delete_drink(Authorized(claims, _): Authorized<DeleteDrinks>) -> AppResult<..> {
///     tracing::info!(sub = %claims.sub, "deleting");
/// }
/// ```
pub struct Authorized<P>(pub Claims, PhantomData<fn() -> P>);

impl<P> Authorized<P> {
    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(AuthError::header_missing)?
        .to_str()
        .map_err(|_| AuthError::malformed_header())?;

    let mut pieces = header.split_whitespace();
    let scheme = pieces.next().ok_or_else(AuthError::not_bearer)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::not_bearer());
    }
    let token = pieces.next().ok_or_else(AuthError::token_not_found)?;
    if pieces.next().is_some() {
        return Err(AuthError::malformed_header());
    }
    Ok(token)
}

/// Check the `permissions` claim against `required`.
pub fn check_permission(claims: &Claims, required: &str) -> Result<(), AuthError> {
    if claims.permissions.is_none() {
        return Err(AuthError::permissions_missing());
    }
    if !claims.grants(required) {
        return Err(AuthError::permission_denied());
    }
    Ok(())
}

impl<P: Permission> FromRequestParts<AppState> for Authorized<P> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = verify_token(token, &state.config.auth)?;
        check_permission(&claims, P::PERMISSION)?;

        tracing::debug!(sub = %claims.sub, permission = P::PERMISSION, "Permission granted");
        Ok(Authorized(claims, PhantomData))
    }
}
