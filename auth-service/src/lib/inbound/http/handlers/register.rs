use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::require_body;
use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::UsernameError;

pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 128;

pub async fn register(
    State(state): State<AppState>,
    body: Option<Json<RegisterRequest>>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let command = require_body(body)?.try_into_command()?;

    state
        .auth_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, "user registered", user.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: must be between {min} and {max} characters")]
    Password { min: usize, max: usize },
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;

        let length = self.password.chars().count();
        if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length) {
            return Err(ParseRegisterRequestError::Password {
                min: PASSWORD_MIN_LENGTH,
                max: PASSWORD_MAX_LENGTH,
            });
        }

        Ok(RegisterCommand::new(username, email, self.password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
