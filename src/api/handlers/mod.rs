//! API request handlers

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use axum::extract::State;
use tracing::error;

use crate::api::types::ApiResponse;
use crate::api::types::HealthResponse;
use crate::database::Database;
use crate::kb::ReplyComposer;
use crate::planner::PlannerCatalog;
use crate::KhetGuruError;

pub mod advisory;
pub mod chat;
pub mod farming;
pub mod market;
pub mod planner;
pub mod weather;

pub use advisory::*;
pub use chat::*;
pub use farming::*;
pub use market::*;
pub use planner::*;
pub use weather::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub database: Arc<Database>,
    pub planner: Arc<PlannerCatalog>,
    pub composer: Arc<ReplyComposer>,
    pub max_results: usize,
}

/// Error returned by handlers, rendered as an `ApiResponse` with a matching status
#[derive(Debug)]
pub struct ApiError(KhetGuruError);

impl From<KhetGuruError> for ApiError {
    fn from(err: KhetGuruError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            KhetGuruError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            KhetGuruError::NotFound(_) => StatusCode::NOT_FOUND,
            KhetGuruError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if self.0.is_client_error() {
            self.0.to_string()
        } else {
            error!("Request failed: {}", self.0);
            "Internal server error".to_string()
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// Health check handler
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        knowledge_entries: state.composer.knowledge_base().len(),
        llm_enabled: state.composer.llm_enabled(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let status = |e: KhetGuruError| ApiError::from(e).status();
        assert_eq!(status(KhetGuruError::InvalidInput("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(KhetGuruError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status(KhetGuruError::Conflict("x".into())), StatusCode::CONFLICT);
        assert_eq!(
            status(KhetGuruError::Custom("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
