use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthData {
    pub status: &'static str,
}

pub async fn health() -> ApiSuccess<HealthData> {
    ApiSuccess::new(StatusCode::OK, "ok", HealthData { status: "ok" })
}
