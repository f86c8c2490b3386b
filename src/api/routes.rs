//! API route definitions

use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::MethodRouter;
use axum::Router;

use super::backend_api_key::backend_api_key_middleware;
use super::backend_api_key::ApiKeyState;
use super::handlers;
use super::handlers::AppState;

/// Require the backend key on a write route when one is configured
fn guarded(route: MethodRouter<AppState>, api_key: Option<&ApiKeyState>) -> MethodRouter<AppState> {
    match api_key {
        Some(key) => route.route_layer(middleware::from_fn_with_state(
            key.clone(),
            backend_api_key_middleware,
        )),
        None => route,
    }
}

/// Create RESTful API router
pub fn api_routes(state: AppState, api_key: Option<&str>) -> Router {
    let key = api_key.map(|k| ApiKeyState {
        expected_key: k.to_string(),
    });
    let key = key.as_ref();

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Chat
        .route("/chat", post(handlers::chat))
        // Crop planner
        .route(
            "/crop-planner/recommendations",
            post(handlers::crop_recommendations),
        )
        .route(
            "/crop-planner/plans/:user_id",
            get(handlers::list_crop_plans).merge(guarded(post(handlers::save_crop_plan), key)),
        )
        // Market prices
        .route("/mandi-rates", get(handlers::mandi_rates))
        .route("/seed-demo", guarded(post(handlers::seed_demo), key))
        .route(
            "/market/prices",
            get(handlers::list_market_prices)
                .merge(guarded(post(handlers::create_market_price), key)),
        )
        .route("/market/prices/:crop", get(handlers::crop_prices))
        .route("/market/trends", get(handlers::market_trends))
        // Weather alerts
        .route("/weather/alerts", get(handlers::list_weather_alerts))
        .route(
            "/weather/alerts/seed",
            guarded(post(handlers::seed_weather_alerts), key),
        )
        .route(
            "/weather/alerts/users/:user_id",
            get(handlers::list_user_weather_alerts)
                .merge(guarded(post(handlers::create_weather_alert), key)),
        )
        // Experts and input suppliers
        .route(
            "/experts/consultations/:user_id",
            get(handlers::list_consultations)
                .merge(guarded(post(handlers::create_consultation), key)),
        )
        .route("/inputs/suppliers", get(handlers::list_suppliers))
        .route(
            "/inputs/suppliers/seed",
            guarded(post(handlers::seed_suppliers), key),
        )
        .route(
            "/inputs/suppliers/category/:category",
            get(handlers::suppliers_by_category),
        )
        // Farmer records
        .route(
            "/soil-tests/:user_id",
            get(handlers::list_soil_tests).merge(guarded(post(handlers::create_soil_test), key)),
        )
        .route(
            "/fields/:user_id",
            get(handlers::list_fields).merge(guarded(post(handlers::create_field), key)),
        )
        .route(
            "/insurance/policies/:user_id",
            get(handlers::list_policies).merge(guarded(post(handlers::create_policy), key)),
        )
        .with_state(state)
}
