//! Chapter API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{
    create_record, created_at_of, delete_record, fetch_record, list_query, merge_record, ok,
    ok_message, page_response, replace_record, ApiResult,
};
use crate::errors::AppError;
use crate::models::{new_record_id, now_iso, CreateChapterRequest};
use crate::store::query::FilterSpec;
use crate::AppState;

const COLLECTION: &str = "chapters";

/// List parameters for chapters. `status` and `sponsorId` are exact-match;
/// `q` searches name, city, and region.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub q: Option<String>,
    pub status: Option<String>,
    pub sponsor_id: Option<String>,
}

/// GET /api/chapters - List chapters.
pub async fn list_chapters(
    State(state): State<AppState>,
    Query(params): Query<ChapterListParams>,
) -> ApiResult<Vec<Value>> {
    let filter = FilterSpec::new()
        .exact("status", params.status.as_deref())
        .exact("sponsorId", params.sponsor_id.as_deref())
        .search(&["name", "city", "region"], params.q.as_deref());

    let query = list_query(params.page, params.limit, params.sort, params.order, filter);
    let page = state.backend.list(COLLECTION, &query).await?;
    page_response(page)
}

/// GET /api/chapters/:id - Get a single chapter.
pub async fn get_chapter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    ok(fetch_record(&state, COLLECTION, "Chapter", &id).await?)
}

/// POST /api/chapters - Create a new chapter.
pub async fn create_chapter(
    State(state): State<AppState>,
    Json(request): Json<CreateChapterRequest>,
) -> ApiResult<Value> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let chapter = request.into_chapter(new_record_id(), now_iso());
    let record = create_record(&state, COLLECTION, &chapter).await?;
    ok_message(record, "Chapter created")
}

/// PUT /api/chapters/:id - Replace a chapter, preserving id and createdAt.
pub async fn update_chapter(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateChapterRequest>,
) -> ApiResult<Value> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let existing = fetch_record(&state, COLLECTION, "Chapter", &id).await?;
    let chapter = request.into_chapter(id.clone(), created_at_of(&existing));
    let record = replace_record(&state, COLLECTION, "Chapter", &id, &chapter).await?;
    ok(record)
}

/// PATCH /api/chapters/:id - Shallow-merge fields into a chapter.
pub async fn patch_chapter(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> ApiResult<Value> {
    ok(merge_record(&state, COLLECTION, "Chapter", &id, patch).await?)
}

/// DELETE /api/chapters/:id - Delete a chapter.
pub async fn delete_chapter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    delete_record(&state, COLLECTION, "Chapter", &id).await?;
    ok_message((), "Chapter deleted")
}

/// POST /api/chapters/:id/activate - Mark a chapter as active.
pub async fn activate_chapter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let patch = json!({ "status": "active" });
    let record = merge_record(&state, COLLECTION, "Chapter", &id, patch).await?;
    ok_message(record, "Chapter activated")
}
