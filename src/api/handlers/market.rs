//! Mandi price handlers

use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::ApiResult;
use super::AppState;
use crate::api::types::ApiResponse;
use crate::api::types::MandiRatesResponse;
use crate::api::types::SeedResponse;
use crate::models::CreateMarketPriceRequest;
use crate::models::MandiRateQuery;
use crate::models::MarketPrice;
use crate::models::MarketTrend;
use crate::KhetGuruError;

/// Latest mandi rates (GET /api/mandi-rates?crop&mandi&limit)
pub async fn mandi_rates(
    State(state): State<AppState>,
    Query(query): Query<MandiRateQuery>,
) -> ApiResult<MandiRatesResponse> {
    let items = state.database.mandi_rates(&query).await?;
    Ok(Json(MandiRatesResponse {
        count: items.len(),
        items,
    }))
}

/// Insert the demo price set (POST /api/seed-demo)
pub async fn seed_demo(State(state): State<AppState>) -> ApiResult<SeedResponse> {
    let inserted = state.database.seed_demo_prices().await?;
    info!("POST /api/seed-demo inserted {}", inserted);
    Ok(Json(SeedResponse { inserted }))
}

/// Record a price sample (POST /api/market/prices)
pub async fn create_market_price(
    State(state): State<AppState>,
    Json(req): Json<CreateMarketPriceRequest>,
) -> ApiResult<ApiResponse<MarketPrice>> {
    if req.crop.trim().is_empty() || req.mandi.trim().is_empty() {
        return Err(KhetGuruError::InvalidInput("crop and mandi are required".to_string()).into());
    }
    if !req.price_per_quintal.is_finite() || req.price_per_quintal <= 0.0 {
        return Err(KhetGuruError::InvalidInput(
            "price_per_quintal must be greater than 0".to_string(),
        )
        .into());
    }
    let price = state.database.insert_market_price(&req).await?;
    Ok(Json(ApiResponse::success(price)))
}

/// Latest price samples (GET /api/market/prices)
pub async fn list_market_prices(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<MarketPrice>>> {
    let prices = state.database.list_market_prices().await?;
    Ok(Json(ApiResponse::success(prices)))
}

/// Latest samples of crops whose name contains the path segment
pub async fn crop_prices(
    State(state): State<AppState>,
    Path(crop): Path<String>,
) -> ApiResult<ApiResponse<Vec<MarketPrice>>> {
    if crop.trim().is_empty() {
        return Err(KhetGuruError::InvalidInput("crop is required".to_string()).into());
    }
    let prices = state.database.search_crop_prices(&crop).await?;
    Ok(Json(ApiResponse::success(prices)))
}

/// Price trends per crop (GET /api/market/trends)
pub async fn market_trends(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<MarketTrend>>> {
    let trends = state.database.market_trends().await?;
    Ok(Json(ApiResponse::success(trends)))
}
