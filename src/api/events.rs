//! Event API endpoints.

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
use crate::models::{
    new_record_id, now_iso, BatchDeleteRequest, BatchDeleteResult, CreateEventRequest,
    EventStatus,
};
use crate::store::query::FilterSpec;
use crate::AppState;

const COLLECTION: &str = "events";

/// List parameters for events. `status` and `category` are exact-match;
/// `q` searches title, description, and location.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub q: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

/// GET /api/events - List events.
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> ApiResult<Vec<Value>> {
    let filter = FilterSpec::new()
        .exact("status", params.status.as_deref())
        .exact("category", params.category.as_deref())
        .search(&["title", "description", "location"], params.q.as_deref());

    let query = list_query(params.page, params.limit, params.sort, params.order, filter);
    let page = state.backend.list(COLLECTION, &query).await?;
    page_response(page)
}

/// GET /api/events/:id - Get a single event.
pub async fn get_event(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    ok(fetch_record(&state, COLLECTION, "Event", &id).await?)
}

/// POST /api/events - Create a new event.
pub async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> ApiResult<Value> {
    validate_event(&request)?;

    let event = request.into_event(new_record_id(), now_iso());
    let record = create_record(&state, COLLECTION, &event).await?;
    ok_message(record, "Event created")
}

/// PUT /api/events/:id - Replace an event, preserving id and createdAt.
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateEventRequest>,
) -> ApiResult<Value> {
    validate_event(&request)?;

    let existing = fetch_record(&state, COLLECTION, "Event", &id).await?;
    let event = request.into_event(id.clone(), created_at_of(&existing));
    let record = replace_record(&state, COLLECTION, "Event", &id, &event).await?;
    ok(record)
}

/// PATCH /api/events/:id - Shallow-merge fields into an event.
pub async fn patch_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> ApiResult<Value> {
    ok(merge_record(&state, COLLECTION, "Event", &id, patch).await?)
}

/// DELETE /api/events/:id - Delete an event.
pub async fn delete_event(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    delete_record(&state, COLLECTION, "Event", &id).await?;
    ok_message((), "Event deleted")
}

/// POST /api/events/:id/publish - Mark an event as published.
pub async fn publish_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let patch = json!({ "status": EventStatus::Published.as_str() });
    let record = merge_record(&state, COLLECTION, "Event", &id, patch).await?;
    ok_message(record, "Event published")
}

/// POST /api/events/:id/rsvp - Register one RSVP against an event.
pub async fn rsvp_to_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let existing = fetch_record(&state, COLLECTION, "Event", &id).await?;

    let count = existing
        .get("rsvpCount")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    if let Some(capacity) = existing.get("capacity").and_then(Value::as_u64) {
        if count >= capacity {
            return Err(AppError::Validation("Event is at capacity".to_string()));
        }
    }

    let patch = json!({ "rsvpCount": count + 1 });
    let record = merge_record(&state, COLLECTION, "Event", &id, patch).await?;
    ok_message(record, "RSVP recorded")
}

/// POST /api/events/batch-delete - Delete many events; missing ids are skipped.
pub async fn batch_delete_events(
    State(state): State<AppState>,
    Json(request): Json<BatchDeleteRequest>,
) -> ApiResult<BatchDeleteResult> {
    if request.ids.is_empty() {
        return Err(AppError::Validation("No ids provided".to_string()));
    }

    let mut deleted = 0;
    for id in &request.ids {
        if state.backend.delete(COLLECTION, id).await? {
            deleted += 1;
        }
    }

    ok_message(BatchDeleteResult { deleted }, "Batch delete completed")
}

fn validate_event(request: &CreateEventRequest) -> Result<(), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if request.date.trim().is_empty() {
        return Err(AppError::Validation("Date is required".to_string()));
    }
    Ok(())
}
