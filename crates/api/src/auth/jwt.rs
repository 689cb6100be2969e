//! Bearer token verification for the permission gate.
//!
//! Tokens are HS256-signed JWTs carrying a [`Claims`] payload with a
//! `permissions` array. Audience and issuer are checked only when configured.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// JWT claims read from every bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject as issued by the identity provider.
    pub sub: String,
    /// Granted permissions (e.g. `"post:drinks"`). `None` when the claim is
    /// absent, which is reported differently from an empty grant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

impl Claims {
    pub fn grants(&self, permission: &str) -> bool {
        self.permissions
            .as_deref()
            .is_some_and(|granted| granted.iter().any(|p| p == permission))
    }
}

/// Configuration for token verification.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret shared with the token issuer.
    pub secret: String,
    /// Expected `aud` claim, if any.
    pub audience: Option<String>,
    /// Expected `iss` claim, if any.
    pub issuer: Option<String>,
    /// Lifetime of tokens minted by [`issue_token`], in minutes.
    pub token_ttl_mins: i64,
}

const DEFAULT_TOKEN_TTL_MINS: i64 = 60;

impl AuthConfig {
    /// Load token settings from environment variables.
    ///
    /// | Env Var               | Required | Default |
    /// |-----------------------|----------|---------|
    /// | `AUTH_JWT_SECRET`     | **yes**  | --      |
    /// | `AUTH_AUDIENCE`       | no       | unset   |
    /// | `AUTH_ISSUER`         | no       | unset   |
    /// | `AUTH_TOKEN_TTL_MINS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `AUTH_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("AUTH_JWT_SECRET")
            .expect("AUTH_JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "AUTH_JWT_SECRET must not be empty");

        let audience = std::env::var("AUTH_AUDIENCE").ok().filter(|s| !s.is_empty());
        let issuer = std::env::var("AUTH_ISSUER").ok().filter(|s| !s.is_empty());

        let token_ttl_mins: i64 = std::env::var("AUTH_TOKEN_TTL_MINS")
            .unwrap_or_else(|_| DEFAULT_TOKEN_TTL_MINS.to_string())
            .parse()
            .expect("AUTH_TOKEN_TTL_MINS must be a valid i64");

        Self {
            secret,
            audience,
            issuer,
            token_ttl_mins,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        match &self.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }
        if let Some(iss) = &self.issuer {
            validation.set_issuer(&[iss]);
        }
        validation
    }
}

/// Mint a token granting `permissions` to `subject`.
///
/// The API never issues tokens itself; this exists for operator tooling and
/// tests.
pub fn issue_token(
    subject: &str,
    permissions: &[&str],
    config: &AuthConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: subject.to_string(),
        permissions: Some(permissions.iter().map(|p| p.to_string()).collect()),
        aud: config.audience.clone(),
        iss: config.issuer.clone(),
        exp: now + config.token_ttl_mins * 60,
        iat: now,
    };
    encode_claims(&claims, config)
}

pub fn encode_claims(
    claims: &Claims,
    config: &AuthConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature, expiry and (when configured) audience and issuer.
pub fn verify_token(token: &str, config: &AuthConfig) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &config.validation(),
    )
    .map(|data| data.claims)
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::token_expired(),
        ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => AuthError::incorrect_claims(),
        _ => AuthError::unparseable(),
    })
}
