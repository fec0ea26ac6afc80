//! HTTP request handlers

use super::state::AppState;
use crate::error::SearchError;
use crate::search::{AggregateResponse, SearchRequest};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{info, warn};

/// Error body shared by every failing endpoint
fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "detail": message.into() }))).into_response()
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        detail(StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
    }
}

/// API banner handler
pub async fn api_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "message": format!("{} API - Multi-Modal Knowledge Discovery Platform", state.instance_name())
    }))
}

/// Universal search handler
pub async fn universal_search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Rejected search body: {}", rejection.body_text());
            return detail(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };

    match state.search.search(&request).await {
        Ok(response) => {
            info!(
                "Search '{}' returned {} of {} results",
                response.query,
                response.results.len(),
                response.total_results
            );
            Json::<AggregateResponse>(response).into_response()
        }
        Err(e) => {
            info!("Invalid search request: {}", e);
            e.into_response()
        }
    }
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
        "providers": state.search.registry().names(),
    }))
}

/// Provider metrics handler
pub async fn stats(State(state): State<AppState>) -> Response {
    match state.metrics {
        Some(ref metrics) => Json(metrics.snapshot()).into_response(),
        None => detail(StatusCode::NOT_FOUND, "metrics are disabled"),
    }
}
