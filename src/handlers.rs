//! HTTP boundary: JSON routes over an [`ItemStore`].
//!
//! Only `GET /items/:id` reports absence distinctly (404). Every other store
//! failure, including a missing id on PATCH or DELETE, becomes the generic
//! 400 failure response.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tower_http::trace::TraceLayer;

use crate::models::{CreateItemInput, Item, UpdateItemInput};
use crate::store::{ItemStore, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("bad id value: {0}")]
    BadId(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadId(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store(StoreError::Storage(err)) => {
                tracing::error!(error = %err, "storage failure");
            }
            ApiError::Store(StoreError::CorruptRecord { id }) => {
                tracing::error!(id, "refusing to serve corrupt item");
            }
            _ => tracing::debug!(error = %self, "request failed"),
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// JSON body extractor whose rejections are validation errors.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections are `bad id value` errors.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:id",
            get(find_item).patch(update_item).delete(delete_item),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /items
async fn list_items(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Item>>>, ApiError> {
    let items = state.store.list().await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /items/:id
async fn find_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response, ApiError> {
    match state.store.find(id).await? {
        Some(item) => Ok(Json(DataResponse { data: item }).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(DataResponse::<Option<Item>> { data: None }),
        )
            .into_response()),
    }
}

/// POST /items
async fn create_item(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateItemInput>,
) -> Result<Json<DataResponse<Item>>, ApiError> {
    let item = state.store.create(input).await?;
    tracing::info!(id = item.id, "item created");
    Ok(Json(DataResponse { data: item }))
}

/// PATCH /items/:id
async fn update_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<UpdateItemInput>,
) -> Result<Json<DataResponse<Item>>, ApiError> {
    let item = state.store.update(id, input).await?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /items/:id
async fn delete_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<DeletedResponse>, ApiError> {
    state.store.delete(id).await?;
    tracing::info!(id, "item deleted");
    Ok(Json(DeletedResponse { deleted: true }))
}
