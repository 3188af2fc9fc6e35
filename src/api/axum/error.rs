use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::TeamError;
use crate::api::ErrorResponse;

/// Converts a [`TeamError`] into a JSON error response.
#[derive(Debug)]
pub struct AppError(pub TeamError);

impl From<TeamError> for AppError {
    fn from(err: TeamError) -> Self {
        Self(err)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TeamError::Validation(_) => StatusCode::BAD_REQUEST,
            TeamError::NotFound => StatusCode::NOT_FOUND,
            TeamError::Forbidden => StatusCode::FORBIDDEN,
            TeamError::AlreadyMember | TeamError::UserAlreadyExists => StatusCode::CONFLICT,
            TeamError::Unauthorized => StatusCode::UNAUTHORIZED,
            TeamError::DatabaseError(_) | TeamError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!(target: "teamwork", "msg=\"request failed\", error=\"{}\"", self.0);
        }

        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}
