use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod availability;
pub mod health;
pub mod login;
pub mod logout;
pub mod me;
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
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, message, data)))
    }
}

impl ApiSuccess<()> {
    /// Success envelope without a `data` member.
    pub fn ack(status: StatusCode, message: impl Into<String>) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::ack(status, message)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "invalid_input", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message, kind))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::InvalidCredentials | UserError::TokenExpired | UserError::TokenInvalid => {
                ApiError::Unauthorized(err.to_string())
            }
            UserError::AccountInactive => ApiError::Forbidden(err.to_string()),
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidUserId(_) => ApiError::BadRequest(err.to_string()),
            UserError::InvalidStatus(_) | UserError::DatabaseError(_) | UserError::Internal(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

/// Unwraps an optional JSON body; a missing or undecodable body is a 400.
pub(crate) fn require_body<T>(body: Option<Json<T>>) -> Result<T, ApiError> {
    body.map(|Json(inner)| inner)
        .ok_or_else(|| ApiError::BadRequest("Missing or malformed request body".to_string()))
}

/// Response envelope shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            code: status_code.as_u16(),
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponseBody<()> {
    pub fn ack(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status_code.as_u16(),
            message: message.into(),
            data: None,
            error: None,
        }
    }

    pub fn new_error(status_code: StatusCode, message: String, kind: &str) -> Self {
        Self {
            code: status_code.as_u16(),
            message,
            data: None,
            error: Some(kind.to_string()),
        }
    }
}

/// Public view of a user. Carries no password material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            status: user.status.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Freshly issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<auth::IssuedToken> for TokenData {
    fn from(issued: auth::IssuedToken) -> Self {
        Self {
            token: issued.token,
            expires_at: issued.expires_at,
        }
    }
}
