use crate::error::AppError;

/// Any path no route matches.
pub async fn not_found() -> AppError {
    AppError::NotFound("no route matches the request path".into())
}

/// A known path requested with a method it does not serve.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
