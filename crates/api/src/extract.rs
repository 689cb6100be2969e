//! Extractor wrappers whose rejections render as the [`AppError`] envelope.
//!
//! axum's stock extractors reply with plain-text bodies on failure. These
//! newtypes delegate to them and convert the rejection, so a malformed body,
//! path or query string looks like every other API error.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body. Syntax errors are 400, shape errors 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `application/x-www-form-urlencoded` body. Repeated keys (`genres`) are
/// collected into sequences.
#[derive(Debug, FromRequest)]
#[from_request(via(axum_extra::extract::Form), rejection(AppError))]
pub struct ApiForm<T>(pub T);

/// Path parameters. A segment that does not parse is a missing resource.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
