//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! database is needed.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use trifold_api::auth::AuthError;
use trifold_api::error::AppError;
use trifold_core::error::CoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404_envelope() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Venue",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], 404);
    assert_eq!(json["message"], "resource not found");
}

#[tokio::test]
async fn page_out_of_range_returns_404() {
    let (status, _) = error_to_response(CoreError::PageOutOfRange { page: 9 }.into()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn validation_error_returns_400() {
    let (status, json) =
        error_to_response(CoreError::Validation("title is required".into()).into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "bad request");
}

#[tokio::test]
async fn unprocessable_error_returns_422() {
    let (status, json) = error_to_response(AppError::Unprocessable("no match".into())).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], 422);
    assert_eq!(json["message"], "unprocessable");
}

#[tokio::test]
async fn database_error_returns_422_without_leaking() {
    let err = AppError::Database(sqlx::Error::Protocol("connection reset by peer".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["message"], "unprocessable");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, _) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "internal server error");
    assert!(!json.to_string().contains("secret"));
}

#[tokio::test]
async fn auth_error_carries_its_own_status_and_description() {
    let (status, json) = error_to_response(AuthError::permission_denied().into()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], 403);
    assert_eq!(json["message"], "Permission not found.");

    let (status, json) = error_to_response(AuthError::permissions_missing().into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Permissions not included in JWT.");
}

#[test]
fn source_errors_convert_into_matching_variants() {
    assert_matches!(
        AppError::from(sqlx::Error::RowNotFound),
        AppError::Database(sqlx::Error::RowNotFound)
    );
    assert_matches!(
        AppError::from(AuthError::token_expired()),
        AppError::Auth(ref auth) if auth.status == StatusCode::UNAUTHORIZED
    );
    assert_matches!(
        AppError::from(CoreError::Unprocessable("no match".into())),
        AppError::Core(CoreError::Unprocessable(_))
    );
}
