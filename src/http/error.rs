//! HTTP-facing error type
//!
//! Remote-collaborator failures are logged with their detail and surfaced
//! as the storefront's generic Turkish message; only validation and auth
//! problems carry a specific message back to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::error;

use crate::admin::cascade::CascadeError;
use crate::quote::selection::SelectionError;
use crate::store::auth::AuthError;
use crate::store::storage::StorageError;
use crate::store::supabase::SupabaseError;

/// Generic user-visible failure message, matching the storefront copy
pub const GENERIC_ERROR: &str = "Bir hata oluştu. Lütfen tekrar deneyin.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::Internal(detail) => {
                error!(%detail, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR.to_string())
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

impl From<SupabaseError> for AppError {
    fn from(e: SupabaseError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<SelectionError> for AppError {
    fn from(e: SelectionError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl From<CascadeError> for AppError {
    fn from(e: CascadeError) -> Self {
        match e {
            CascadeError::NotFound => AppError::NotFound("Kayıt bulunamadı.".to_string()),
            CascadeError::Store(inner) => AppError::Internal(inner.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Connectivity(_) => AppError::Unavailable(
                "Sunucuya bağlanılamıyor. Lütfen internet bağlantınızı kontrol edin.".to_string(),
            ),
            AuthError::InvalidCredentials(msg) => AppError::Unauthorized(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}
