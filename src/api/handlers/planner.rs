//! Crop planner handlers

use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::ApiResult;
use super::AppState;
use crate::api::types::ApiResponse;
use crate::api::types::PlannerRequest;
use crate::api::types::PlannerResponse;
use crate::models::CreateCropPlanRequest;
use crate::models::CropPlan;
use crate::planner::recommend_crops;
use crate::KhetGuruError;

/// Rank crops for the request (POST /api/crop-planner/recommendations)
pub async fn crop_recommendations(
    State(state): State<AppState>,
    Json(req): Json<PlannerRequest>,
) -> ApiResult<PlannerResponse> {
    let input = req.validate()?;
    info!(
        "POST /api/crop-planner/recommendations season={} area={}",
        input.season, input.area_acres
    );

    let prices = state
        .database
        .price_snapshot(&state.planner.crop_names())
        .await;
    let recommendations = recommend_crops(&state.planner, &input, &prices, state.max_results);

    Ok(Json(PlannerResponse {
        count: recommendations.len(),
        recommendations,
    }))
}

/// Save a chosen crop (POST /api/crop-planner/plans/:user_id)
pub async fn save_crop_plan(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<CreateCropPlanRequest>,
) -> ApiResult<ApiResponse<CropPlan>> {
    if req.crop.trim().is_empty() || req.season.trim().is_empty() {
        return Err(KhetGuruError::InvalidInput("crop and season are required".to_string()).into());
    }
    let plan = state.database.create_crop_plan(user_id, &req).await?;
    Ok(Json(ApiResponse::success(plan)))
}

/// List saved plans (GET /api/crop-planner/plans/:user_id)
pub async fn list_crop_plans(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<ApiResponse<Vec<CropPlan>>> {
    let plans = state.database.list_crop_plans(user_id).await?;
    Ok(Json(ApiResponse::success(plans)))
}
