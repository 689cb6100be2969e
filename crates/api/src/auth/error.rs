use axum::http::StatusCode;

/// An authorization failure. Unlike other errors it carries the status and
/// description to send, so the envelope reports exactly why the credential
/// was refused.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{code}: {description}")]
pub struct AuthError {
    pub status: StatusCode,
    pub code: &'static str,
    pub description: String,
}

impl AuthError {
    fn new(status: StatusCode, code: &'static str, description: &str) -> Self {
        Self {
            status,
            code,
            description: description.to_string(),
        }
    }

    pub fn header_missing() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "authorization_header_missing",
            "Authorization header is expected.",
        )
    }

    pub fn not_bearer() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "invalid_header",
            "Authorization header must start with \"Bearer\".",
        )
    }

    pub fn token_not_found() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "invalid_header", "Token not found.")
    }

    pub fn malformed_header() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "invalid_header",
            "Authorization header must be bearer token.",
        )
    }

    pub fn token_expired() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "token_expired", "Token expired.")
    }

    pub fn incorrect_claims() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "invalid_claims",
            "Incorrect claims. Please, check the audience and issuer.",
        )
    }

    pub fn unparseable() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "invalid_header",
            "Unable to parse authentication token.",
        )
    }

    pub fn permissions_missing() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "invalid_claims",
            "Permissions not included in JWT.",
        )
    }

    pub fn permission_denied() -> Self {
        Self::new(StatusCode::FORBIDDEN, "unauthorized", "Permission not found.")
    }
}
