//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use aircare_domain::error::{AirCareError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`AirCareError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(AirCareError);

impl From<AirCareError> for ApiError {
    fn from(err: AirCareError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(AirCareError::Validation(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AirCareError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AirCareError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
