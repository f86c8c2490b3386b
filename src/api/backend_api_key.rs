use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use crate::api::types::ApiResponse;

/// Header carrying the shared backend key
pub const API_KEY_HEADER: &str = "X-API-KEY";

#[derive(Clone)]
pub struct ApiKeyState {
    pub expected_key: String,
}

/// Backend API key authentication middleware
pub async fn backend_api_key_middleware(
    State(state): State<ApiKeyState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let header = request.headers().get(API_KEY_HEADER);
    match header.and_then(|h| h.to_str().ok()) {
        Some(k) if k == state.expected_key => next.run(request).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::error("Unauthorized")),
        )
            .into_response(),
    }
}
