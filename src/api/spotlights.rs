//! Spotlight API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::{
    create_record, created_at_of, delete_record, fetch_record, list_query, merge_record, ok,
    ok_message, page_response, replace_record, ApiResult,
};
use crate::errors::AppError;
use crate::models::{new_record_id, now_iso, CreateSpotlightRequest};
use crate::store::query::FilterSpec;
use crate::AppState;

const COLLECTION: &str = "spotlights";

/// List parameters for spotlights. `featured` is exact-match; `q` searches
/// title, alumniName, and summary.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotlightListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub q: Option<String>,
    pub featured: Option<String>,
}

/// GET /api/spotlights - List spotlights.
pub async fn list_spotlights(
    State(state): State<AppState>,
    Query(params): Query<SpotlightListParams>,
) -> ApiResult<Vec<Value>> {
    let filter = FilterSpec::new()
        .exact("featured", params.featured.as_deref())
        .search(&["title", "alumniName", "summary"], params.q.as_deref());

    let query = list_query(params.page, params.limit, params.sort, params.order, filter);
    let page = state.backend.list(COLLECTION, &query).await?;
    page_response(page)
}

/// GET /api/spotlights/:id - Get a single spotlight.
pub async fn get_spotlight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    ok(fetch_record(&state, COLLECTION, "Spotlight", &id).await?)
}

/// POST /api/spotlights - Create a new spotlight.
pub async fn create_spotlight(
    State(state): State<AppState>,
    Json(request): Json<CreateSpotlightRequest>,
) -> ApiResult<Value> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    let spotlight = request.into_spotlight(new_record_id(), now_iso());
    let record = create_record(&state, COLLECTION, &spotlight).await?;
    ok_message(record, "Spotlight created")
}

/// PUT /api/spotlights/:id - Replace a spotlight, preserving id and createdAt.
pub async fn update_spotlight(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateSpotlightRequest>,
) -> ApiResult<Value> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    let existing = fetch_record(&state, COLLECTION, "Spotlight", &id).await?;
    let spotlight = request.into_spotlight(id.clone(), created_at_of(&existing));
    let record = replace_record(&state, COLLECTION, "Spotlight", &id, &spotlight).await?;
    ok(record)
}

/// PATCH /api/spotlights/:id - Shallow-merge fields into a spotlight.
pub async fn patch_spotlight(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> ApiResult<Value> {
    ok(merge_record(&state, COLLECTION, "Spotlight", &id, patch).await?)
}

/// DELETE /api/spotlights/:id - Delete a spotlight.
pub async fn delete_spotlight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    delete_record(&state, COLLECTION, "Spotlight", &id).await?;
    ok_message((), "Spotlight deleted")
}
