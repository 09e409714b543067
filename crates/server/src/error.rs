use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use payload_api_types::ErrorResponse;
use payload_core::PayloadError;
use thiserror::Error;
use tracing::error;

use crate::views::ViewError;

/// Failures raised while turning a payload into an HTTP response.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error("invalid response status: {0}")]
    InvalidStatus(u16),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::View(ViewError::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Payload(PayloadError::StatusNotSet) => "STATUS_NOT_SET",
            ApiError::Payload(PayloadError::NotKeyed) => "OUTPUT_NOT_KEYED",
            ApiError::Payload(PayloadError::MissingKey(_)) => "OUTPUT_KEY_MISSING",
            ApiError::Payload(PayloadError::Serialization(_)) => "SERIALIZATION_ERROR",
            ApiError::View(ViewError::NotFound(_)) => "VIEW_NOT_FOUND",
            ApiError::View(ViewError::Encode(_)) => "VIEW_RENDER_ERROR",
            ApiError::InvalidStatus(_) => "INVALID_STATUS",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!(code = self.code(), error = %self, "failed to build payload response");

        let body = Json(ErrorResponse::new(self.code(), self.to_string()));
        (status, body).into_response()
    }
}
