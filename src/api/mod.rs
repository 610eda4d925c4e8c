//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.
//! Handlers mint record ids and timestamps, validate request bodies, and wrap
//! every result in the standard envelope; storage semantics live behind the
//! `Backend` trait.

mod applications;
mod chapters;
mod events;
mod mentorships;
mod opportunities;
mod partners;
mod qa;
mod spotlights;
mod sponsors;
mod users;

pub use applications::*;
pub use chapters::*;
pub use events::*;
pub use mentorships::*;
pub use opportunities::*;
pub use partners::*;
pub use qa::*;
pub use spotlights::*;
pub use sponsors::*;
pub use users::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::now_iso;
use crate::store::query::{
    Direction, FilterSpec, ListQuery, Page, PageMeta, DEFAULT_PAGE_LIMIT,
};
use crate::AppState;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageMeta>,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that is either a success envelope or an error envelope.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse {
        success: true,
        message: None,
        data,
        pagination: None,
    })
}

/// Create a successful API response with a human-readable message.
pub fn ok_message<T: Serialize>(data: T, message: &str) -> ApiResult<T> {
    Ok(ApiResponse {
        success: true,
        message: Some(message.to_string()),
        data,
        pagination: None,
    })
}

/// Wrap one page of records with its pagination metadata.
pub fn page_response(page: Page) -> ApiResult<Vec<Value>> {
    let meta = page.meta();
    Ok(ApiResponse {
        success: true,
        message: None,
        data: page.items,
        pagination: Some(meta),
    })
}

/// Assemble a `ListQuery` from the common list parameters.
pub(crate) fn list_query(
    page: Option<u64>,
    limit: Option<u64>,
    sort: Option<String>,
    order: Option<String>,
    filter: FilterSpec,
) -> ListQuery {
    ListQuery {
        filter,
        sort: sort.map(|field| (field, Direction::parse(order.as_deref()))),
        page: page.unwrap_or(1),
        limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT),
    }
}

/// Fetch a record or surface a 404.
pub(crate) async fn fetch_record(
    state: &AppState,
    collection: &str,
    what: &str,
    id: &str,
) -> Result<Value, AppError> {
    state
        .backend
        .get(collection, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {} not found", what, id)))
}

/// Serialize an entity and append it to its collection.
pub(crate) async fn create_record<T: Serialize>(
    state: &AppState,
    collection: &str,
    entity: &T,
) -> Result<Value, AppError> {
    let record = serde_json::to_value(entity)?;
    state.backend.create(collection, record).await
}

/// Serialize an entity and replace the record with the given id.
pub(crate) async fn replace_record<T: Serialize>(
    state: &AppState,
    collection: &str,
    what: &str,
    id: &str,
    entity: &T,
) -> Result<Value, AppError> {
    let record = serde_json::to_value(entity)?;
    state
        .backend
        .replace(collection, id, record)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {} not found", what, id)))
}

/// Shallow-merge a patch into a record, refreshing its `updatedAt` stamp.
pub(crate) async fn merge_record(
    state: &AppState,
    collection: &str,
    what: &str,
    id: &str,
    mut patch: Value,
) -> Result<Value, AppError> {
    if let Value::Object(map) = &mut patch {
        map.insert("updatedAt".to_string(), Value::String(now_iso()));
    }
    state
        .backend
        .merge(collection, id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {} not found", what, id)))
}

/// Delete a record or surface a 404.
pub(crate) async fn delete_record(
    state: &AppState,
    collection: &str,
    what: &str,
    id: &str,
) -> Result<(), AppError> {
    if state.backend.delete(collection, id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("{} {} not found", what, id)))
    }
}

/// The `createdAt` stamp of an existing record, for PUT replacements.
pub(crate) fn created_at_of(record: &Value) -> String {
    record
        .get("createdAt")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(now_iso)
}
