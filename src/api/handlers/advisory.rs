//! Expert consultation and input supplier handlers

use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::ApiResult;
use super::AppState;
use crate::api::types::ApiResponse;
use crate::api::types::SeedResponse;
use crate::models::ConsultationType;
use crate::models::CreateConsultationRequest;
use crate::models::ExpertConsultation;
use crate::models::SupplierProfile;
use crate::KhetGuruError;

pub async fn create_consultation(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<CreateConsultationRequest>,
) -> ApiResult<ApiResponse<ExpertConsultation>> {
    if req.expert_name.trim().is_empty() || req.topic.trim().is_empty() {
        return Err(
            KhetGuruError::InvalidInput("expert_name and topic are required".to_string()).into(),
        );
    }
    req.consultation_type.parse::<ConsultationType>()?;

    let consultation = state.database.create_consultation(user_id, &req).await?;
    Ok(Json(ApiResponse::success(consultation)))
}

pub async fn list_consultations(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<ApiResponse<Vec<ExpertConsultation>>> {
    let consultations = state.database.list_consultations(user_id).await?;
    Ok(Json(ApiResponse::success(consultations)))
}

/// Supplier directory (GET /api/inputs/suppliers)
pub async fn list_suppliers(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<SupplierProfile>>> {
    let suppliers = state.database.list_suppliers().await?;
    Ok(Json(ApiResponse::success(
        suppliers.into_iter().map(SupplierProfile::from).collect(),
    )))
}

/// Suppliers of one category, matched by substring
pub async fn suppliers_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<ApiResponse<Vec<SupplierProfile>>> {
    let suppliers = state.database.suppliers_by_category(&category).await?;
    Ok(Json(ApiResponse::success(
        suppliers.into_iter().map(SupplierProfile::from).collect(),
    )))
}

/// Fill an empty supplier directory (POST /api/inputs/suppliers/seed)
pub async fn seed_suppliers(State(state): State<AppState>) -> ApiResult<SeedResponse> {
    let inserted = state.database.seed_demo_suppliers().await?;
    info!("POST /api/inputs/suppliers/seed inserted {}", inserted);
    Ok(Json(SeedResponse { inserted }))
}
