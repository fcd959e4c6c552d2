//! Error handling for the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::response::{ErrorResponse, MessageResponse};

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                error = %self,
                "Request error"
            );
        } else {
            tracing::debug!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                error = %self,
                "Request rejected"
            );
        }

        // Not-found answers with a message body; everything else with an error body.
        match self {
            AppError::NotFound { message } => {
                (status, Json(MessageResponse { message })).into_response()
            }
            AppError::BadRequest { message } => {
                (status, Json(ErrorResponse { error: message })).into_response()
            }
            AppError::Internal(e) => {
                (status, Json(ErrorResponse::new(e.to_string()))).into_response()
            }
        }
    }
}
