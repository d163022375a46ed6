//! Risk Register API
//!
//! REST surface over the risk service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          RISK REGISTER API                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         REST API                                 │   │
//! │  │   OpenAPI 3 | CORS (any origin) | Request Tracing               │   │
//! │  └───────────────────────────────┬─────────────────────────────────┘   │
//! │                                  │                                     │
//! │  ┌──────────────┐  ┌─────────────▼┐  ┌──────────────┐  ┌─────────────┐ │
//! │  │   /health    │  │ /assess-risk │  │    /risks    │  │  /preview   │ │
//! │  │              │  │              │  │ summary|heat │  │             │ │
//! │  └──────────────┘  └──────┬───────┘  └──────┬───────┘  └─────────────┘ │
//! │                           │                 │                          │
//! │  ┌────────────────────────▼─────────────────▼─────────────────────┐    │
//! │  │                RISK SERVICE  →  SQLite risks table              │    │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod extract;
pub mod models;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use risk_core::RiskService;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::ServerConfig;
pub use models::*;

/// API state
#[derive(Clone)]
pub struct ApiState {
    /// Risk service
    pub service: RiskService,
    /// API version
    pub version: String,
}

impl ApiState {
    /// State over a service, tagged with this crate's version
    pub fn new(service: RiskService) -> Self {
        Self {
            service,
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Risk Register API",
        description = "Asset/threat risk scoring and register",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::risks::assess_risk,
        routes::risks::list_risks,
        routes::analytics::get_summary,
        routes::analytics::get_heatmap,
        routes::preview::preview_risk,
    ),
    components(
        schemas(
            ErrorResponse, RiskCreate, routes::health::HealthResponse,
            risk_core::RiskRecord, risk_core::RiskLevel, risk_core::Assessment,
            risk_core::RiskSummary, risk_core::LevelCounts,
            risk_core::Heatmap, risk_core::HeatmapCell
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "risks", description = "Risk assessment and register"),
        (name = "analytics", description = "Dashboard aggregates")
    )
)]
pub struct ApiDoc;

/// Build the API router
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(routes::health::health_check))
        .route("/health", get(routes::health::health_check))
        .route("/assess-risk", post(routes::risks::assess_risk))
        .route("/risks", get(routes::risks::list_risks))
        .route("/risks/summary", get(routes::analytics::get_summary))
        .route("/risks/heatmap", get(routes::analytics::get_heatmap))
        .route("/preview", get(routes::preview::preview_risk))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}
