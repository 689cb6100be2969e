use crate::auth::jwt::AuthConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the token secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// SQLite URL (default: `sqlite://trifold.db`).
    pub database_url: String,
    /// Upper bound on pooled connections (default: `5`).
    pub database_max_connections: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Idle seconds before a directory session is discarded (default: `1800`).
    pub session_ttl_secs: u64,
    /// Bearer token verification settings for the drink catalog.
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default               |
    /// |----------------------------|-----------------------|
    /// | `HOST`                     | `0.0.0.0`             |
    /// | `PORT`                     | `3000`                |
    /// | `DATABASE_URL`             | `sqlite://trifold.db` |
    /// | `DATABASE_MAX_CONNECTIONS` | `5`                   |
    /// | `CORS_ORIGINS`             | `*`                   |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                  |
    /// | `SESSION_TTL_SECS`         | `1800`                |
    ///
    /// See [`AuthConfig::from_env`] for the token settings.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://trifold.db".into());

        let database_max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let session_ttl_secs: u64 = std::env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| "1800".into())
            .parse()
            .expect("SESSION_TTL_SECS must be a valid u64");

        let auth = AuthConfig::from_env();

        Self {
            host,
            port,
            database_url,
            database_max_connections,
            cors_origins,
            request_timeout_secs,
            session_ttl_secs,
            auth,
        }
    }

    /// Whether `CORS_ORIGINS` opts into any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}
