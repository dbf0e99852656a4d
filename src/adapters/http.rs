use crate::core::engine::QueryEngine;
use crate::domain::model::QueryResponse;
use crate::domain::ports::{CatalogClient, ParameterExtractor, ResponseGenerator};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// HTTP 層錯誤；其餘錯誤已在引擎內折疊成自然語言回應
#[derive(Debug)]
pub enum ApiError {
    MissingQuery,
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingQuery => (StatusCode::BAD_REQUEST, "請提供查詢內容".to_string()),
            ApiError::Internal(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("處理查詢時發生錯誤: {}", detail),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!("❌ Unhandled failure while processing query: {}", detail);
    ApiError::Internal(detail).into_response()
}

pub fn create_router<E, C, R>(engine: Arc<QueryEngine<E, C, R>>) -> Router
where
    E: ParameterExtractor + 'static,
    C: CatalogClient + 'static,
    R: ResponseGenerator + 'static,
{
    Router::new()
        .route("/api/query", post(handle_query::<E, C, R>))
        .route("/health", get(health_check))
        .with_state(engine)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn handle_query<E, C, R>(
    State(engine): State<Arc<QueryEngine<E, C, R>>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError>
where
    E: ParameterExtractor + 'static,
    C: CatalogClient + 'static,
    R: ResponseGenerator + 'static,
{
    let Json(request) = payload.map_err(|e| {
        tracing::error!("Invalid request body: {}", e);
        ApiError::Internal(e.body_text())
    })?;

    let query = request
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or(ApiError::MissingQuery)?;

    Ok(Json(engine.run(query).await))
}
