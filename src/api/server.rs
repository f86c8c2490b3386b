//! HTTP server implementation

use std::sync::Arc;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing::warn;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::database::Database;
use crate::kb::KnowledgeBase;
use crate::kb::ReplyComposer;
use crate::llm::LlmService;
use crate::planner::PlannerCatalog;
use crate::Result;

/// Load catalogs, the optional model client and the database pool
///
/// The pool connects lazily so chat and planning keep working while the
/// database is down; planner prices then come from the fallback table.
pub fn build_state(config: &AppConfig) -> Result<AppState> {
    let kb = Arc::new(KnowledgeBase::load(&config.knowledge)?);
    let planner = Arc::new(PlannerCatalog::load(&config.planner)?);
    let llm = LlmService::from_config(config)?.map(Arc::new);
    let database = Arc::new(Database::connect_lazy(config)?);

    Ok(AppState {
        database,
        planner,
        composer: Arc::new(ReplyComposer::new(kb, llm)),
        max_results: config.planner_max_results(),
    })
}

/// Router with all middleware layers applied
pub fn build_app(state: AppState, config: &AppConfig, enable_cors: bool) -> Router {
    let api_key = config.backend_api_key();
    if api_key.is_some() {
        info!("🔒 Write endpoints require the X-API-KEY header");
    } else {
        warn!("No server.api_key configured - write endpoints are open");
    }

    let mut app = Router::new()
        .nest("/api", routes::api_routes(state, api_key))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    // Add CORS if enabled
    if enable_cors {
        info!("✅ CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Start the API server
pub async fn serve_api(config: &AppConfig, host: String, port: u16, enable_cors: bool) -> Result<()> {
    info!("🚀 Starting KhetGuru API server...");

    let state = build_state(config)?;
    let app = build_app(state, config, enable_cors);

    // Start server
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /api/health                         - Health check");
    info!("  POST /api/chat                           - Chat with KhetGuru");
    info!("  POST /api/crop-planner/recommendations   - Crop recommendations");
    info!("  GET  /api/crop-planner/plans/:user_id    - Saved crop plans");
    info!("  GET  /api/mandi-rates                    - Latest mandi rates");
    info!("  GET  /api/market/prices                  - Latest price samples");
    info!("  GET  /api/market/prices/:crop            - Price search by crop");
    info!("  GET  /api/market/trends                  - Price trends");
    info!("  GET  /api/weather/alerts                 - Weather alerts");
    info!("  GET  /api/weather/alerts/users/:user_id  - Alerts for a farmer");
    info!("  GET  /api/experts/consultations/:user_id - Expert consultations");
    info!("  GET  /api/inputs/suppliers               - Input suppliers");
    info!("  GET  /api/soil-tests/:user_id            - Soil tests");
    info!("  GET  /api/fields/:user_id                - Farm fields");
    info!("  GET  /api/insurance/policies/:user_id    - Insurance policies");

    axum::serve(listener, app).await?;

    Ok(())
}
