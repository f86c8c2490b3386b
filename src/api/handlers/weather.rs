//! Weather alert handlers

use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::ApiResult;
use super::AppState;
use crate::api::types::ApiResponse;
use crate::api::types::SeedResponse;
use crate::models::AlertSeverity;
use crate::models::CreateWeatherAlertRequest;
use crate::models::WeatherAlert;
use crate::KhetGuruError;

/// Latest alerts of every scope (GET /api/weather/alerts)
pub async fn list_weather_alerts(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<WeatherAlert>>> {
    let alerts = state.database.list_weather_alerts().await?;
    Ok(Json(ApiResponse::success(alerts)))
}

/// Global alerts plus the farmer's own
pub async fn list_user_weather_alerts(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<ApiResponse<Vec<WeatherAlert>>> {
    let alerts = state.database.list_user_weather_alerts(user_id).await?;
    Ok(Json(ApiResponse::success(alerts)))
}

pub async fn create_weather_alert(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<CreateWeatherAlertRequest>,
) -> ApiResult<ApiResponse<WeatherAlert>> {
    if req.title.trim().is_empty() || req.message.trim().is_empty() {
        return Err(KhetGuruError::InvalidInput("title and message are required".to_string()).into());
    }
    req.severity.parse::<AlertSeverity>()?;

    let alert = state.database.create_weather_alert(user_id, &req).await?;
    Ok(Json(ApiResponse::success(alert)))
}

/// Fill an empty alert table with the demo alerts (POST /api/weather/alerts/seed)
pub async fn seed_weather_alerts(State(state): State<AppState>) -> ApiResult<SeedResponse> {
    let inserted = state.database.seed_weather_alerts().await?;
    info!("POST /api/weather/alerts/seed inserted {}", inserted);
    Ok(Json(SeedResponse { inserted }))
}
