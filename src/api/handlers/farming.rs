//! Farmer record handlers: soil tests, fields and insurance policies

use axum::extract::Path;
use axum::extract::State;
use axum::Json;

use super::ApiResult;
use super::AppState;
use crate::api::types::ApiResponse;
use crate::models::*;
use crate::planner::MAX_PH;
use crate::planner::MIN_PH;
use crate::KhetGuruError;

fn invalid(message: &str) -> super::ApiError {
    KhetGuruError::InvalidInput(message.to_string()).into()
}

pub async fn create_soil_test(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<CreateSoilTestRequest>,
) -> ApiResult<ApiResponse<SoilTest>> {
    if !(MIN_PH..=MAX_PH).contains(&req.ph) {
        return Err(invalid("ph must be between 3.5 and 9"));
    }
    if [req.nitrogen, req.phosphorus, req.potassium]
        .iter()
        .any(|v| !v.is_finite() || *v < 0.0)
    {
        return Err(invalid("nutrient values must be non-negative"));
    }
    let test = state.database.create_soil_test(user_id, &req).await?;
    Ok(Json(ApiResponse::success(test)))
}

pub async fn list_soil_tests(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<ApiResponse<Vec<SoilTest>>> {
    let tests = state.database.list_soil_tests(user_id).await?;
    Ok(Json(ApiResponse::success(tests)))
}

pub async fn create_field(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<CreateFieldRequest>,
) -> ApiResult<ApiResponse<FarmField>> {
    if req.name.trim().is_empty() {
        return Err(invalid("field name is required"));
    }
    if !req.area_acres.is_finite() || req.area_acres <= 0.0 {
        return Err(invalid("area_acres must be greater than 0"));
    }
    if !(-90.0..=90.0).contains(&req.latitude) || !(-180.0..=180.0).contains(&req.longitude) {
        return Err(invalid("latitude/longitude out of range"));
    }
    let field = state.database.create_field(user_id, &req).await?;
    Ok(Json(ApiResponse::success(field)))
}

pub async fn list_fields(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<ApiResponse<Vec<FarmField>>> {
    let fields = state.database.list_fields(user_id).await?;
    Ok(Json(ApiResponse::success(fields)))
}

/// Register a policy; a reused policy number is a 409
pub async fn create_policy(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<CreatePolicyRequest>,
) -> ApiResult<ApiResponse<InsurancePolicy>> {
    if req.policy_number.trim().is_empty() || req.crop.trim().is_empty() {
        return Err(invalid("policy_number and crop are required"));
    }
    if req.coverage_amount < 0.0 || req.premium < 0.0 {
        return Err(invalid("coverage_amount and premium must be non-negative"));
    }
    let policy = state.database.create_policy(user_id, &req).await?;
    Ok(Json(ApiResponse::success(policy)))
}

pub async fn list_policies(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<ApiResponse<Vec<InsurancePolicy>>> {
    let policies = state.database.list_policies(user_id).await?;
    Ok(Json(ApiResponse::success(policies)))
}
