//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::{error, info, warn};

use crate::engine::{EngineConfig, EngineError, SearchRadius, Session};
use crate::lines::hydrate;
use crate::provider::GeoProvider;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<P: GeoProvider + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/search", get(search::<P>))
        .route("/api/lines/:id", get(line_detail::<P>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Apply per-request overrides to the server's engine config.
fn request_config(
    defaults: &EngineConfig,
    radius: Option<u32>,
    city: Option<&str>,
) -> Result<EngineConfig, AppError> {
    let mut config = defaults.clone();

    if let Some(meters) = radius {
        config.radius = SearchRadius::new(meters)?;
    }

    if let Some(city) = city.map(str::trim).filter(|c| !c.is_empty()) {
        config.city = city.to_string();
    }

    Ok(config)
}

/// Run one discovery cycle around an address.
///
/// Answers with whatever has settled once the search deadline passes;
/// `done` is false in that case.
async fn search<P: GeoProvider>(
    State(state): State<AppState<P>>,
    Query(req): Query<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let address = req.address.trim();
    if address.is_empty() {
        return Err(AppError::BadRequest {
            message: "address is required".to_string(),
        });
    }

    let config = request_config(&state.config, req.radius, req.city.as_deref())?;
    let radius_m = config.radius.meters();
    let session = Session::new(state.provider.clone(), config);

    let view = match tokio::time::timeout(state.search_deadline, session.search(address)).await {
        Ok(result) => result?,
        Err(_) => {
            warn!(%address, "Search deadline passed; returning partial results");
            session.snapshot()
        }
    };

    info!(
        %address,
        stations = view.stations.len(),
        lines = view.lines.len(),
        done = view.lines_done,
        "Search answered"
    );
    Ok(Json(SearchResponse::from_view(&view, radius_m)))
}

/// Fetch one line's path, stops and operating window.
async fn line_detail<P: GeoProvider>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
    Query(req): Query<LineDetailRequest>,
) -> Result<Json<LineDetailResponse>, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::BadRequest {
            message: "line id is required".to_string(),
        });
    }

    let config = request_config(&state.config, None, req.city.as_deref())?;
    let patch = hydrate(&*state.provider, id, &config.city).await;
    Ok(Json(LineDetailResponse::from_patch(id, &patch)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<EngineError> for AppError {
    fn from(e: EngineError) -> Self {
        let message = e.to_string();
        match e {
            EngineError::InvalidRadius(_) => AppError::BadRequest { message },
            EngineError::AddressNotFound { .. } | EngineError::UnknownLine(_) => {
                AppError::NotFound { message }
            }
            EngineError::ProviderUnavailable(_) => AppError::Unavailable { message },
            EngineError::Superseded => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
