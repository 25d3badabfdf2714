use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::store::StoreError;

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, ForgeError>;

/// Application error taxonomy.
#[derive(Error, Debug)]
pub enum ForgeError {
    /// Requested record or page has no match
    #[error("not found")]
    NotFound,

    /// Store operation failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Bad admin credentials; message is intentionally generic
    #[error("Invalid email or password")]
    AuthFailure,

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Page template could not be assembled
    #[error("template error: {0}")]
    Template(String),
}

impl ForgeError {
    /// True when the error means "no such record" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ForgeError::NotFound | ForgeError::Store(StoreError::NotFound { .. })
        )
    }
}

impl IntoResponse for ForgeError {
    fn into_response(self) -> Response {
        if self.is_not_found() {
            return (StatusCode::NOT_FOUND, Html(not_found_page().to_string())).into_response();
        }

        match self {
            ForgeError::AuthFailure => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password").into_response()
            }
            ForgeError::Template(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Template error: {}", e),
            )
                .into_response(),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {}", other),
            )
                .into_response(),
        }
    }
}

/// Minimal standalone 404 page, used when no page context is available.
fn not_found_page() -> &'static str {
    r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>404 - Not Found</title>
    <link rel="stylesheet" href="/static/css/forge.css">
</head>
<body>
    <div class="error-page">
        <div class="error-container">
            <div class="error-icon">404</div>
            <h1 class="error-title">Page Not Found</h1>
            <p class="error-message">The page you're looking for doesn't exist.</p>
            <div class="error-actions">
                <a href="/" class="button primary">Go Home</a>
                <a href="/strategies" class="button secondary">Browse Strategies</a>
            </div>
        </div>
    </div>
</body>
</html>"#
}
