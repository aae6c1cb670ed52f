use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_core::error::CoreError;
use folio_notify::NotifyError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Every variant renders as `{ "msg": <message>, "code": <kind> }`. Server
/// failures carry the underlying error's message and are logged before the
/// response is built.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `folio_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The project announcement could not be delivered.
    #[error("Notification failed: {0}")]
    Notify(#[from] NotifyError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(CoreError::NotFound { entity }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} not found"),
            ),
            AppError::Core(CoreError::Internal(msg)) => internal(&self, msg.clone()),
            AppError::Database(err) => internal(&self, err.to_string()),
            AppError::Notify(err) => internal(&self, err.to_string()),
            AppError::InternalError(msg) => internal(&self, msg.clone()),
        };

        let body = json!({
            "msg": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal(err: &AppError, message: String) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %err, "Request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
}
