use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error("request could not be processed")]
    Unprocessable,
    #[error("malformed request")]
    BadRequest,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("database error: {0}")]
    DataBaseError(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: u16,
    success: bool,
    message: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::DataBaseError(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            ApiError::DataBaseError(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

fn message_for(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => "Resource Not Found",
        StatusCode::UNPROCESSABLE_ENTITY => "Unprocessable Request",
        StatusCode::BAD_REQUEST => "Bad Request",
        StatusCode::METHOD_NOT_ALLOWED => "Method Not Allowed",
        _ => "Internal Server Error",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: status.as_u16(),
            success: false,
            message: message_for(status),
        };
        (status, Json(body)).into_response()
    }
}

// well-formed JSON of the wrong shape is a 422, anything unreadable is a 400
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "rejected request body");
        match rejection {
            JsonRejection::JsonDataError(_) => ApiError::Unprocessable,
            _ => ApiError::BadRequest,
        }
    }
}

// path segments that don't parse (`/questions/abc`) address nothing
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "rejected path");
        ApiError::NotFound
    }
}
