//! Axum HTTP API for the calculator.
//!
//! Routes:
//! - `GET  /health` - liveness check
//! - `POST /api/calculate` - `{location, roofArea, dwellers}` to a calculation result
//! - `GET  /api/locations` - known city names for autocomplete
//!
//! When a static directory is configured every other path is served from
//! it, with `index.html` as the fallback for client-side routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use rwh_core::service::{CalculationRequest, CalculationResult, HarvestService};
use rwh_core::HarvestError;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<HarvestService>,
}

impl AppState {
    pub fn new(service: HarvestService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/api/calculate", post(calculate))
        .route("/api/locations", get(list_locations));

    let router = match static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).not_found_service(ServeFile::new(dir.join("index.html"))),
        ),
        None => router,
    };

    router
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server(
    host: IpAddr,
    port: u16,
    static_dir: Option<PathBuf>,
    service: HarvestService,
) -> anyhow::Result<()> {
    let app = create_router(AppState::new(service), static_dir.as_deref());
    if let Some(dir) = &static_dir {
        log::info!("Serving static files from {}", dir.display());
    }

    let addr = SocketAddr::new(host, port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("RWH server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}

// ───────────────────── Handlers ─────────────────────

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<Json<CalculationResult>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    // SQLite access blocks, keep it off the async workers.
    let service = Arc::clone(&state.service);
    let result = tokio::task::spawn_blocking(move || service.calculate(&request))
        .await
        .map_err(|e| HarvestError::Internal(anyhow::anyhow!("calculation task failed: {}", e)))??;

    Ok(Json(result))
}

async fn list_locations(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let service = Arc::clone(&state.service);
    let cities = tokio::task::spawn_blocking(move || service.cities())
        .await
        .map_err(|e| anyhow::anyhow!("location listing task failed: {}", e))
        .and_then(|cities| cities)
        .map_err(HarvestError::Internal)?;

    Ok(Json(serde_json::json!({ "cities": cities })))
}

// ───────────────────── Error Handling ─────────────────────

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Harvest(HarvestError),
}

impl From<HarvestError> for AppError {
    fn from(err: HarvestError) -> Self {
        AppError::Harvest(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Harvest(err) => match err {
                HarvestError::MissingInput(msg) => (StatusCode::BAD_REQUEST, msg),
                HarvestError::LocationNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                HarvestError::InvalidLocationData { .. } => {
                    log::warn!("{}", err);
                    (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
                }
                HarvestError::Internal(e) => {
                    log::error!("Calculation API error: {:#}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Server error during calculation.".to_string(),
                    )
                }
            },
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
