use crate::error::EstimateError;
use crate::models::{HealthStatus, ModelInfo};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: "Success".to_string(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message,
        }
    }
}

impl IntoResponse for EstimateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if self.is_client_error() || status == StatusCode::SERVICE_UNAVAILABLE {
            self.to_string()
        } else {
            "Internal error".to_string()
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

/// `GET /estimateForAnonymous/{toItemID}/{itemID1(=value1)}/{itemID2(=value2)}/...`
///
/// Responds with the estimate as plain text.
async fn estimate_for_anonymous(
    State(state): State<AppState>,
    Path((to_item_id, item_ids)): Path<(String, String)>,
) -> Result<String, EstimateError> {
    let tokens: Vec<&str> = item_ids.split('/').filter(|s| !s.is_empty()).collect();
    if tokens.is_empty() {
        return Err(EstimateError::MissingObservations);
    }
    let estimate = state
        .serving_service
        .estimate_for_anonymous(&to_item_id, &tokens)?;
    Ok(estimate.to_string())
}

async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::success(state.serving_service.health()))
}

async fn model_info(State(state): State<AppState>) -> Result<Json<ApiResponse<ModelInfo>>, EstimateError> {
    let model = state.model_store.current()?;
    Ok(Json(ApiResponse::success(model.info())))
}

async fn serving_stats(State(state): State<AppState>) -> Json<ApiResponse<HashMap<String, u64>>> {
    Json(ApiResponse::success(state.serving_service.serving_stats()))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(serving_stats))
        .route("/model", get(model_info))
        .route(
            "/estimateForAnonymous/:to_item_id/*item_ids",
            get(estimate_for_anonymous),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
