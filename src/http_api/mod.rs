use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use parking_lot::RwLock;
use serde_json::json;
use tracing::{error, info};

use crate::{
    AllocationError, AllocatorConfig, BudgetAllocator, Catalog, CatalogError, CombinationRequest,
    CombinationResponse, ErrorResponse, Offering,
};

#[derive(Clone)]
pub struct AppState {
    allocator: Arc<BudgetAllocator>,
    catalog: Arc<RwLock<Catalog>>,
}

impl AppState {
    pub fn new(allocator: BudgetAllocator, catalog: Catalog) -> Self {
        Self {
            allocator: Arc::new(allocator),
            catalog: Arc::new(RwLock::new(catalog)),
        }
    }

    fn catalog(&self) -> Arc<RwLock<Catalog>> {
        self.catalog.clone()
    }
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl From<AllocationError> for ApiError {
    fn from(value: AllocationError) -> Self {
        let message = ErrorResponse::from(&value).error;
        match value {
            AllocationError::InvalidRequest(_) => ApiError::Invalid(message),
            AllocationError::InvalidCatalog(_) => ApiError::Internal(message),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::InvalidData(message) => ApiError::Invalid(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        ApiError::invalid(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => {
                error!("request failed: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/config", get(get_config))
        .route("/offerings", get(list_offerings).put(replace_offerings))
        .route("/combinations", post(find_combinations))
        .with_state(state)
}

pub async fn serve(
    addr: SocketAddr,
    allocator: BudgetAllocator,
    catalog: Catalog,
) -> std::io::Result<()> {
    let state = AppState::new(allocator, catalog);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "budget allocator HTTP API listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_config(State(state): State<AppState>) -> Json<AllocatorConfig> {
    Json(state.allocator.config().clone())
}

async fn list_offerings(State(state): State<AppState>) -> Json<Vec<Offering>> {
    let catalog = state.catalog();
    let offerings = {
        let guard = catalog.read();
        guard.offerings().to_vec()
    };
    Json(offerings)
}

async fn replace_offerings(
    State(state): State<AppState>,
    payload: Result<Json<Vec<Offering>>, JsonRejection>,
) -> Result<Json<Vec<Offering>>, ApiError> {
    let Json(offerings) = payload?;
    let replacement = Catalog::from_offerings(offerings)?;
    replacement.validate_against(state.allocator.config())?;
    let catalog = state.catalog();
    let current = {
        let mut guard = catalog.write();
        *guard = replacement;
        guard.offerings().to_vec()
    };
    info!(count = current.len(), "catalog snapshot replaced");
    Ok(Json(current))
}

async fn find_combinations(
    State(state): State<AppState>,
    payload: Result<Json<CombinationRequest>, JsonRejection>,
) -> Result<Json<CombinationResponse>, ApiError> {
    let Json(body) = payload?;
    let request = body.into_request()?;
    let catalog = state.catalog();
    let result = {
        let guard = catalog.read();
        state.allocator.allocate(guard.offerings(), &request)?
    };
    Ok(Json(CombinationResponse::from(result)))
}
