use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::TokenData;
use crate::inbound::http::middleware::bearer_token;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<TokenData>, ApiError> {
    let token = bearer_token(&headers)?;

    state
        .auth_service
        .refresh(token)
        .await
        .map_err(ApiError::from)
        .map(|issued| ApiSuccess::new(StatusCode::OK, "token refreshed", issued.into()))
}
