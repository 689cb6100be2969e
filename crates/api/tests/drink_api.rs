//! Integration tests for the drink catalog and its permission gate.

mod common;

use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{Method, Request, StatusCode};
use common::{authed, body_json, get, seed_drink, send, token};
use serde_json::json;
use trifold_api::auth::jwt::{encode_claims, Claims};
use trifold_db::repositories::DrinkRepo;

fn water() -> serde_json::Value {
    json!([{"name": "water", "color": "blue", "parts": 1}])
}

fn all_permissions() -> String {
    token(&[
        "get:drinks-detail",
        "post:drinks",
        "patch:drinks",
        "delete:drinks",
    ])
}

// ---------------------------------------------------------------------------
// Public listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn public_listing_hides_ingredient_detail() {
    let pool = common::test_pool().await;
    seed_drink(&pool, "Water", water()).await;
    let app = common::build_test_app(pool);

    let response = get(&app, "/drinks").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["drinks"][0]["title"], "Water");
    assert_eq!(json["drinks"][0]["recipe"], json!([{"name": "water"}]));
}

// ---------------------------------------------------------------------------
// Permission gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn detail_requires_authorization_header() {
    let app = common::build_test_app(common::test_pool().await);

    let response = get(&app, "/drinks-detail").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], 401);
    assert_eq!(json["message"], "Authorization header is expected.");
}

#[tokio::test]
async fn non_bearer_header_is_rejected() {
    let app = common::build_test_app(common::test_pool().await);
    let request = Request::builder()
        .uri("/drinks-detail")
        .header(AUTHORIZATION, "Token abc")
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_unparseable() {
    let app = common::build_test_app(common::test_pool().await);

    let response = authed(&app, Method::GET, "/drinks-detail", "not.a.jwt", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "Unable to parse authentication token."
    );
}

#[tokio::test]
async fn expired_token_is_reported() {
    let app = common::build_test_app(common::test_pool().await);
    let now = chrono::Utc::now().timestamp();
    let expired = encode_claims(
        &Claims {
            sub: "barista".into(),
            permissions: Some(vec!["get:drinks-detail".into()]),
            aud: None,
            iss: None,
            exp: now - 600,
            iat: now - 1200,
        },
        &common::test_config().auth,
    )
    .unwrap();

    let response = authed(&app, Method::GET, "/drinks-detail", &expired, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Token expired.");
}

#[tokio::test]
async fn token_without_permissions_claim_is_bad_request() {
    let app = common::build_test_app(common::test_pool().await);
    let now = chrono::Utc::now().timestamp();
    let bare = encode_claims(
        &Claims {
            sub: "barista".into(),
            permissions: None,
            aud: None,
            iss: None,
            exp: now + 600,
            iat: now,
        },
        &common::test_config().auth,
    )
    .unwrap();

    let response = authed(&app, Method::GET, "/drinks-detail", &bare, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Permissions not included in JWT."
    );
}

#[tokio::test]
async fn missing_permission_is_forbidden() {
    let pool = common::test_pool().await;
    seed_drink(&pool, "Water", water()).await;
    let app = common::build_test_app(pool);
    let barista = token(&["get:drinks-detail"]);

    let allowed = authed(&app, Method::GET, "/drinks-detail", &barista, None).await;
    assert_eq!(allowed.status(), StatusCode::OK);
    let json = body_json(allowed).await;
    assert_eq!(json["drinks"][0]["recipe"][0]["color"], "blue");
    assert_eq!(json["drinks"][0]["recipe"][0]["parts"], 1);

    let denied = authed(&app, Method::DELETE, "/drinks/1", &barista, None).await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(denied).await["message"], "Permission not found.");
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn drink_is_created_from_single_ingredient() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool.clone());

    let body = json!({"title": "Flat White", "recipe": {"name": "milk", "color": "white", "parts": 2}});
    let response = authed(&app, Method::POST, "/drinks", &all_permissions(), Some(&body)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["drinks"][0]["title"], "Flat White");
    assert_eq!(json["drinks"][0]["recipe"].as_array().unwrap().len(), 1);
    assert_eq!(DrinkRepo::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn drink_without_recipe_is_bad_request_and_not_stored() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool.clone());

    let body = json!({"title": "Air"});
    let response = authed(&app, Method::POST, "/drinks", &all_permissions(), Some(&body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(DrinkRepo::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn duplicate_title_is_unprocessable_and_count_unchanged() {
    let pool = common::test_pool().await;
    seed_drink(&pool, "Water", water()).await;
    let app = common::build_test_app(pool.clone());

    let body = json!({"title": "Water", "recipe": water()});
    let response = authed(&app, Method::POST, "/drinks", &all_permissions(), Some(&body)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(DrinkRepo::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn malformed_recipe_is_unprocessable() {
    let app = common::build_test_app(common::test_pool().await);

    let body = json!({"title": "Mystery", "recipe": [{"name": "x"}]});
    let response = authed(&app, Method::POST, "/drinks", &all_permissions(), Some(&body)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn patch_updates_title_only() {
    let pool = common::test_pool().await;
    let id = seed_drink(&pool, "Water", water()).await;
    let app = common::build_test_app(pool);

    let body = json!({"title": "Sparkling Water"});
    let response = authed(
        &app,
        Method::PATCH,
        &format!("/drinks/{id}"),
        &all_permissions(),
        Some(&body),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["drinks"][0]["title"], "Sparkling Water");
    assert_eq!(json["drinks"][0]["recipe"], water());
}

#[tokio::test]
async fn patch_and_delete_missing_drink_are_404() {
    let app = common::build_test_app(common::test_pool().await);
    let token = all_permissions();

    let body = json!({"title": "Ghost"});
    let patch = authed(&app, Method::PATCH, "/drinks/42", &token, Some(&body)).await;
    assert_eq!(patch.status(), StatusCode::NOT_FOUND);

    let delete = authed(&app, Method::DELETE, "/drinks/42", &token, None).await;
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_reports_removed_id() {
    let pool = common::test_pool().await;
    let id = seed_drink(&pool, "Water", water()).await;
    let app = common::build_test_app(pool.clone());

    let response = authed(
        &app,
        Method::DELETE,
        &format!("/drinks/{id}"),
        &all_permissions(),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["delete"], id);

    assert_eq!(DrinkRepo::count(&pool).await.unwrap(), 0);
}
