use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use venue_core::error::VenueError;

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<VenueError>() {
            match e {
                VenueError::NotInitialized | VenueError::InvalidConfig(_) => {
                    StatusCode::BAD_REQUEST
                }
                VenueError::Tracker { .. } => StatusCode::BAD_GATEWAY,
                VenueError::Io(_) | VenueError::Yaml(_) | VenueError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self.0, "request failed");
        }

        // Tracker errors already carry the upstream message; don't wrap it.
        let message = match self.0.downcast_ref::<VenueError>() {
            Some(VenueError::Tracker { message, .. }) => message.clone(),
            _ => self.0.to_string(),
        };
        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
