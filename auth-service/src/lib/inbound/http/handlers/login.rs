use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::require_body;
use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::inbound::http::router::AppState;

/// Exchange a username or email plus password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    body: Option<Json<LoginRequest>>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let command = require_body(body)?.try_into_command()?;

    state
        .auth_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|outcome| ApiSuccess::new(StatusCode::OK, "login successful", outcome.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    identifier: String,
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ApiError> {
        if self.identifier.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "Identifier must not be empty".to_string(),
            ));
        }
        if self.password.is_empty() {
            return Err(ApiError::BadRequest("Password must not be empty".to_string()));
        }

        Ok(LoginCommand {
            identifier: self.identifier,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserData,
}

impl From<LoginOutcome> for LoginResponseData {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            user: UserData::from(&outcome.user),
            token: outcome.token.token,
            expires_at: outcome.token.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_rejected() {
        let blank_identifier = LoginRequest {
            identifier: "  ".to_string(),
            password: "s3cret!".to_string(),
        };
        let blank_password = LoginRequest {
            identifier: "alice".to_string(),
            password: String::new(),
        };

        assert!(matches!(
            blank_identifier.try_into_command(),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            blank_password.try_into_command(),
            Err(ApiError::BadRequest(_))
        ));
    }
}
