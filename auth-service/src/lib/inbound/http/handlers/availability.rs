use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::require_body;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckUsernameRequest {
    username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckEmailRequest {
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityData {
    pub available: bool,
}

fn availability(available: bool) -> ApiSuccess<AvailabilityData> {
    let message = if available { "available" } else { "already taken" };
    ApiSuccess::new(StatusCode::OK, message, AvailabilityData { available })
}

pub async fn check_username(
    State(state): State<AppState>,
    body: Option<Json<CheckUsernameRequest>>,
) -> Result<ApiSuccess<AvailabilityData>, ApiError> {
    let username = Username::new(require_body(body)?.username).map_err(UserError::from)?;

    state
        .auth_service
        .is_username_available(&username)
        .await
        .map_err(ApiError::from)
        .map(availability)
}

pub async fn check_email(
    State(state): State<AppState>,
    body: Option<Json<CheckEmailRequest>>,
) -> Result<ApiSuccess<AvailabilityData>, ApiError> {
    let email = EmailAddress::new(require_body(body)?.email).map_err(UserError::from)?;

    state
        .auth_service
        .is_email_available(&email)
        .await
        .map_err(ApiError::from)
        .map(availability)
}
