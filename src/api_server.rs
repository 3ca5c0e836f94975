// Axum Server Module
//
// Purpose: HTML pages over the three upstream COVID-19 APIs, plus static
// assets and a health check. Nothing is cached; every page request fetches
// its data again.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};

use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use thiserror::Error;

use crate::config::Config;
use crate::upstream::{UpstreamClient, UpstreamError};
use crate::utils::local_date;
use crate::web::handlers::pages;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        tracing::info!("Building upstream HTTP client...");
        let upstream = UpstreamClient::new(
            config.endpoints.clone(),
            config.upstream_timeout,
            config.use_system_proxy,
        )
        .context("Failed to build upstream client")?;

        Ok(Self {
            config: Arc::new(config),
            upstream,
        })
    }

    /// Current date where the national report is published
    pub fn today(&self) -> NaiveDate {
        local_date(chrono::Utc::now(), &self.config.report_timezone)
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Pages (HTML)
        .route("/", get(pages::index_page))
        .route("/regional", get(pages::regional_page))
        .route("/regional/", get(pages::regional_page))
        .route("/concelho", get(pages::concelho_page))
        .route("/concelho/", get(pages::concelho_page))

        // Static assets (CSS)
        .nest_service("/static", static_files)

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

// ============================================================================
// Error Handling
// ============================================================================

/// Response bodies stay generic; upstream URLs and details only go to the log
pub const UPSTREAM_UNAVAILABLE: &str = "Dados indisponíveis de momento.";
pub const RENDER_FAILED: &str = "Erro ao gerar a página.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Upstream data unavailable: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Upstream(_) => (StatusCode::BAD_GATEWAY, UPSTREAM_UNAVAILABLE),
            AppError::Template(_) => (StatusCode::INTERNAL_SERVER_ERROR, RENDER_FAILED),
        };

        tracing::error!("{} ({})", self, status);

        (status, message).into_response()
    }
}
