use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiSuccess;
use crate::inbound::http::middleware::bearer_token;
use crate::inbound::http::router::AppState;

/// Always succeeds. A presented token is revoked when revocation is enabled.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> ApiSuccess<()> {
    if let Ok(token) = bearer_token(&headers) {
        state.auth_service.logout(token).await;
    }

    ApiSuccess::ack(StatusCode::OK, "logged out")
}
