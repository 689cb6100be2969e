//! Server-side sessions for the directory pages.
//!
//! A session holds queued flash messages and the last rejected submission of
//! each form, keyed by an opaque id stored in the `trifold_session` cookie.
//! Handlers take a [`Session`] extractor and return it as a response part so
//! a newly minted id reaches the browser.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponseParts, ResponseParts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::state::AppState;

pub const SESSION_COOKIE: &str = "trifold_session";

#[derive(Debug)]
struct SessionData {
    flashes: Vec<String>,
    forms: HashMap<String, Value>,
    touched: Instant,
}

impl SessionData {
    fn new() -> Self {
        Self {
            flashes: Vec::new(),
            forms: HashMap::new(),
            touched: Instant::now(),
        }
    }

    fn is_empty(&self) -> bool {
        self.flashes.is_empty() && self.forms.is_empty()
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.touched.elapsed() >= ttl
    }
}

/// Interval between sweeps of idle sessions (in seconds).
const SWEEP_INTERVAL_SECS: u64 = 60;

/// In-memory session map shared across requests.
///
/// Entries are dropped as soon as they hold nothing. Entries left behind by
/// clients that never come back are discarded once idle for `ttl`: on every
/// write and by the background sweep.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionData>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Queue a flash message for the next render of this session.
    pub async fn flash(&self, id: &str, message: impl Into<String>) {
        let mut sessions = self.sessions.write().await;
        self.entry(&mut sessions, id).flashes.push(message.into());
    }

    /// Remove and return every queued flash message, oldest first.
    pub async fn take_flashes(&self, id: &str) -> Vec<String> {
        let mut sessions = self.sessions.write().await;
        let Some(data) = self.live(&mut sessions, id) else {
            return Vec::new();
        };
        let flashes = std::mem::take(&mut data.flashes);
        if data.is_empty() {
            sessions.remove(id);
        }
        flashes
    }

    /// Remember a rejected form submission under `key`.
    pub async fn stash_form(&self, id: &str, key: &str, form: Value) {
        let mut sessions = self.sessions.write().await;
        self.entry(&mut sessions, id)
            .forms
            .insert(key.to_string(), form);
    }

    /// Remove and return the submission stashed under `key`.
    pub async fn take_form(&self, id: &str, key: &str) -> Option<Value> {
        let mut sessions = self.sessions.write().await;
        let data = self.live(&mut sessions, id)?;
        let form = data.forms.remove(key);
        if data.is_empty() {
            sessions.remove(id);
        }
        form
    }

    /// Drop every session idle for longer than the ttl. Returns how many
    /// were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        self.purge(&mut sessions)
    }

    /// Number of sessions currently holding data.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn purge(&self, sessions: &mut HashMap<String, SessionData>) -> usize {
        let before = sessions.len();
        sessions.retain(|_, data| !data.is_expired(self.ttl));
        before - sessions.len()
    }

    /// The entry for `id`, created if absent, after purging idle sessions.
    fn entry<'a>(
        &self,
        sessions: &'a mut HashMap<String, SessionData>,
        id: &str,
    ) -> &'a mut SessionData {
        self.purge(sessions);
        let data = sessions
            .entry(id.to_string())
            .or_insert_with(SessionData::new);
        data.touched = Instant::now();
        data
    }

    /// The entry for `id` unless it has gone idle; an idle one is removed.
    fn live<'a>(
        &self,
        sessions: &'a mut HashMap<String, SessionData>,
        id: &str,
    ) -> Option<&'a mut SessionData> {
        if sessions.get(id)?.is_expired(self.ttl) {
            sessions.remove(id);
            return None;
        }
        sessions.get_mut(id)
    }
}

/// Spawn a background task that periodically drops idle sessions.
///
/// Runs until aborted; `main` aborts it during shutdown.
pub fn start_session_sweeper(store: Arc<SessionStore>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));

        loop {
            interval.tick().await;
            let removed = store.purge_expired().await;
            if removed > 0 {
                tracing::debug!(removed, "Idle sessions discarded");
            }
        }
    })
}

/// The caller's session, resolved from the cookie or freshly minted.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    fresh: bool,
    store: Arc<SessionStore>,
}

impl Session {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn flash(&self, message: impl Into<String>) {
        self.store.flash(&self.id, message).await;
    }

    pub async fn take_flashes(&self) -> Vec<String> {
        self.store.take_flashes(&self.id).await
    }

    /// Stash a form for redisplay. A form that fails to serialize is
    /// dropped; the user simply sees an empty form again.
    pub async fn stash_form<T: Serialize>(&self, key: &str, form: &T) {
        match serde_json::to_value(form) {
            Ok(value) => self.store.stash_form(&self.id, key, value).await,
            Err(err) => tracing::warn!(error = %err, key, "Form not stashed"),
        }
    }

    /// Take back a stashed form, if one was left by a failed submission.
    pub async fn take_form<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.store.take_form(&self.id, key).await?;
        serde_json::from_value(value)
            .inspect_err(|err| tracing::warn!(error = %err, key, "Stashed form unreadable"))
            .ok()
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let existing = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value())
            .and_then(|value| Uuid::parse_str(value).ok());

        let (id, fresh) = match existing {
            Some(id) => (id, false),
            None => (Uuid::new_v4(), true),
        };

        Ok(Session {
            id: id.to_string(),
            fresh,
            store: Arc::clone(&state.sessions),
        })
    }
}

impl IntoResponseParts for Session {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if !self.fresh {
            return Ok(res);
        }
        let cookie = Cookie::build((SESSION_COOKIE, self.id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        CookieJar::new().add(cookie).into_response_parts(res)
    }
}
