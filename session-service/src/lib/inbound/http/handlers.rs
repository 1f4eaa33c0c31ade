use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::middleware::GateRejection;
use crate::user::errors::AuthError;

pub mod current_user;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Machine-readable rejection kind sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    UserExists,
    InvalidCredentials,
    UserNotFound,
    RefreshTokenExpired,
    InvalidRefreshToken,
    RefreshFailed,
    NoTokenFound,
    InvalidToken,
    ValidationFailed,
    InternalError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
        }
    }

    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::ValidationFailed,
            message,
        )
    }

    pub fn internal_server_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::InternalError,
            "Internal server error",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiResponseBody::new_error(self.status, self.kind, self.message)),
        )
            .into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidEmail(_) | AuthError::InvalidPassword(_) | AuthError::InvalidPhone(_) => {
                ApiError::unprocessable_entity(err.to_string())
            }
            AuthError::AlreadyExists(_) => {
                ApiError::new(StatusCode::CONFLICT, ErrorKind::UserExists, err.to_string())
            }
            AuthError::InvalidCredentials => ApiError::new(
                StatusCode::UNAUTHORIZED,
                ErrorKind::InvalidCredentials,
                err.to_string(),
            ),
            AuthError::NotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, ErrorKind::UserNotFound, err.to_string())
            }
            AuthError::RefreshExpired => ApiError::new(
                StatusCode::UNAUTHORIZED,
                ErrorKind::RefreshTokenExpired,
                err.to_string(),
            ),
            AuthError::InvalidRefresh => ApiError::new(
                StatusCode::UNAUTHORIZED,
                ErrorKind::InvalidRefreshToken,
                err.to_string(),
            ),
            AuthError::RefreshFailed => ApiError::new(
                StatusCode::UNAUTHORIZED,
                ErrorKind::RefreshFailed,
                err.to_string(),
            ),
            AuthError::DatabaseError(_) | AuthError::Unknown(_) => {
                tracing::error!(error = %err, "Request failed with internal error");
                ApiError::internal_server_error()
            }
        }
    }
}

impl From<GateRejection> for ApiError {
    fn from(rejection: GateRejection) -> Self {
        match rejection {
            GateRejection::NoTokenFound => ApiError::new(
                StatusCode::UNAUTHORIZED,
                ErrorKind::NoTokenFound,
                rejection.to_string(),
            ),
            GateRejection::InvalidToken => ApiError::new(
                StatusCode::FORBIDDEN,
                ErrorKind::InvalidToken,
                rejection.to_string(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, kind: ErrorKind, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData {
                kind,
                message,
                timestamp: Utc::now(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub kind: ErrorKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
