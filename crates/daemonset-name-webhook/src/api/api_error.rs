use axum::{http::StatusCode, response::IntoResponse};

use crate::mutation::MutationError;

#[derive(Debug)]
/// An error that can be returned by the API.
/// It is rendered as a plain text body carrying `message`.
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn internal(message: String) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }
}

impl From<MutationError> for ApiError {
    fn from(error: MutationError) -> Self {
        let status = if error.is_internal() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::BAD_REQUEST
        };

        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
