#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use trifold_api::auth::jwt::{issue_token, AuthConfig};
use trifold_api::config::ServerConfig;
use trifold_api::router::build_app_router;
use trifold_api::session::SESSION_COOKIE;
use trifold_api::state::AppState;
use trifold_core::forms::{ArtistForm, ShowSubmission, VenueForm};
use trifold_core::recipe::Recipe;
use trifold_core::types::DbId;
use trifold_db::models::question::NewQuestion;
use trifold_db::repositories::{ArtistRepo, DrinkRepo, QuestionRepo, ShowRepo, VenueRepo};
use trifold_db::DbPool;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin and a 30-second request
/// timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_ttl_secs: 1800,
        auth: AuthConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            audience: None,
            issuer: None,
            token_ttl_mins: 15,
        },
    }
}

/// Fresh in-memory database with every migration applied.
pub async fn test_pool() -> DbPool {
    let pool = trifold_db::create_pool("sqlite::memory:", 1)
        .await
        .expect("in-memory pool");
    trifold_db::run_migrations(&pool)
        .await
        .expect("migrations apply");
    pool
}

/// Build the full application router over `pool`.
///
/// Clone the returned router per request; clones share state, so session
/// flashes survive across requests.
pub fn build_test_app(pool: DbPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// A bearer token signed with the test secret.
pub fn token(permissions: &[&str]) -> String {
    issue_token("test|user", permissions, &test_config().auth).expect("token signs")
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_form(app: &Router, uri: &str, body: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// A request carrying `Authorization: Bearer <token>` and an optional JSON
/// body.
pub async fn authed(
    app: &Router,
    method: Method,
    uri: &str,
    token: &str,
    body: Option<&Value>,
) -> Response {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"));
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// `trifold_session=<id>` from a response's `Set-Cookie`, ready to send back.
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(SESSION_COOKIE))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

pub async fn seed_venue(pool: &DbPool, name: &str, city: &str, state: &str) -> DbId {
    let form = VenueForm {
        name: name.into(),
        city: city.into(),
        state: state.into(),
        address: "1015 Folsom Street".into(),
        genres: vec!["Jazz".into(), "Reggae".into()],
        ..Default::default()
    };
    let mut conn = pool.acquire().await.unwrap();
    VenueRepo::create(&mut conn, &form).await.unwrap().id
}

pub async fn seed_artist(pool: &DbPool, name: &str) -> DbId {
    let form = ArtistForm {
        name: name.into(),
        city: "San Francisco".into(),
        state: "CA".into(),
        genres: vec!["Rock n Roll".into()],
        ..Default::default()
    };
    let mut conn = pool.acquire().await.unwrap();
    ArtistRepo::create(&mut conn, &form).await.unwrap().id
}

/// A show `offset_days` from now (negative for past shows).
pub async fn seed_show(pool: &DbPool, artist_id: DbId, venue_id: DbId, offset_days: i64) {
    let submission = ShowSubmission {
        artist_id,
        venue_id,
        start_time: Utc::now() + Duration::days(offset_days),
    };
    let mut conn = pool.acquire().await.unwrap();
    ShowRepo::create(&mut conn, &submission).await.unwrap();
}

pub async fn seed_question(pool: &DbPool, text: &str, category: DbId) -> DbId {
    let input = NewQuestion {
        question: text.into(),
        answer: "An answer".into(),
        category: Some(category),
        difficulty: Some(3),
    };
    let mut conn = pool.acquire().await.unwrap();
    QuestionRepo::create(&mut conn, &input).await.unwrap().id
}

pub async fn seed_drink(pool: &DbPool, title: &str, recipe: Value) -> DbId {
    let recipe = Recipe::from_value(recipe).unwrap();
    let mut conn = pool.acquire().await.unwrap();
    DrinkRepo::create(&mut conn, title, &recipe).await.unwrap().id
}
