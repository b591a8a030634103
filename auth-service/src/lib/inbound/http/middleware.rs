use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type carrying the validated caller into handlers.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub claims: auth::Claims,
}

/// Middleware that validates the bearer token and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?.to_string();

    let claims = state.auth_service.authenticate(&token).await.map_err(|e| {
        tracing::warn!("Bearer validation failed: {}", e);
        ApiError::from(e)
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!("Token subject is not a user id: {}", e);
        ApiError::Unauthorized("invalid token".to_string())
    })?;

    req.extensions_mut()
        .insert(AuthenticatedUser { user_id, claims });

    Ok(next.run(req).await)
}

/// Reads `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let value = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::Unauthorized(
                "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
            )
        })?;

    Ok(token)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("bearer abc")), Ok("abc"));
    }

    #[test]
    fn test_bearer_token_rejects_malformed_headers() {
        assert!(bearer_token(&HeaderMap::new()).is_err());
        assert!(bearer_token(&headers("Basic dXNlcjpwYXNz")).is_err());
        assert!(bearer_token(&headers("Bearer ")).is_err());
    }
}
