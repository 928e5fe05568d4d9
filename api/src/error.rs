use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::error::StoreError;

/// HTTP-facing error kinds. Store failures are logged with their cause
/// and answered with a generic body.
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, "organization not found").into_response()
            }
            ApiError::Store(err) => {
                tracing::error!(error = %err, "store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}
