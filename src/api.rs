//! HTTP API exposing the advisor orchestrator
//!
//! Thin axum layer: one health endpoint and one advise endpoint. All
//! responses use a uniform envelope so the frontend can branch on
//! `success` without inspecting status codes.

use crate::orchestrator::{AdvisorResponse, Orchestrator};
use crate::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Clone)]
pub struct ApiState {
    pub orchestrator: Arc<Orchestrator>,
}

#[derive(Debug, Deserialize)]
pub struct AdviseRequest {
    pub query: String,
}

/// Uniform response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now(),
        }
    }
}

async fn health() -> Json<ApiResponse<String>> {
    Json(ApiResponse::success("MSP advisor API is running".to_string()))
}

async fn advise(
    State(state): State<ApiState>,
    Json(request): Json<AdviseRequest>,
) -> (StatusCode, Json<ApiResponse<AdvisorResponse>>) {
    if request.query.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("query must not be empty".to_string())),
        );
    }

    info!(query = %request.query, "Advise request received");

    match state.orchestrator.advise(&request.query).await {
        Ok(response) => (StatusCode::OK, Json(ApiResponse::success(response))),
        Err(e) => {
            error!(error = %e, "Advise request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        }
    }
}

pub fn create_router(orchestrator: Arc<Orchestrator>) -> Router {
    let state = ApiState { orchestrator };

    Router::new()
        .route("/health", get(health))
        .route("/api/advise", post(advise))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(orchestrator: Arc<Orchestrator>, port: u16) -> Result<()> {
    let router = create_router(orchestrator);
    let addr = format!("0.0.0.0:{}", port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Advisor API listening");

    axum::serve(listener, router).await?;
    Ok(())
}
