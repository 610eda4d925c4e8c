//! Mentorship API endpoints.

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
use crate::models::{new_record_id, now_iso, CreateMentorshipRequest};
use crate::store::query::FilterSpec;
use crate::AppState;

const COLLECTION: &str = "mentorships";

/// List parameters for mentorships. All filters are exact-match; `q`
/// searches the topic.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorshipListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub q: Option<String>,
    pub status: Option<String>,
    pub mentor_id: Option<String>,
    pub mentee_id: Option<String>,
}

/// GET /api/mentorships - List mentorships.
pub async fn list_mentorships(
    State(state): State<AppState>,
    Query(params): Query<MentorshipListParams>,
) -> ApiResult<Vec<Value>> {
    let filter = FilterSpec::new()
        .exact("status", params.status.as_deref())
        .exact("mentorId", params.mentor_id.as_deref())
        .exact("menteeId", params.mentee_id.as_deref())
        .search(&["topic", "notes"], params.q.as_deref());

    let query = list_query(params.page, params.limit, params.sort, params.order, filter);
    let page = state.backend.list(COLLECTION, &query).await?;
    page_response(page)
}

/// GET /api/mentorships/:id - Get a single mentorship.
pub async fn get_mentorship(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    ok(fetch_record(&state, COLLECTION, "Mentorship", &id).await?)
}

/// POST /api/mentorships - Create a new mentorship.
pub async fn create_mentorship(
    State(state): State<AppState>,
    Json(request): Json<CreateMentorshipRequest>,
) -> ApiResult<Value> {
    validate_mentorship(&request)?;

    let mentorship = request.into_mentorship(new_record_id(), now_iso());
    let record = create_record(&state, COLLECTION, &mentorship).await?;
    ok_message(record, "Mentorship created")
}

/// PUT /api/mentorships/:id - Replace a mentorship, preserving id and createdAt.
pub async fn update_mentorship(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateMentorshipRequest>,
) -> ApiResult<Value> {
    validate_mentorship(&request)?;

    let existing = fetch_record(&state, COLLECTION, "Mentorship", &id).await?;
    let mentorship = request.into_mentorship(id.clone(), created_at_of(&existing));
    let record = replace_record(&state, COLLECTION, "Mentorship", &id, &mentorship).await?;
    ok(record)
}

/// PATCH /api/mentorships/:id - Shallow-merge fields into a mentorship.
pub async fn patch_mentorship(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> ApiResult<Value> {
    ok(merge_record(&state, COLLECTION, "Mentorship", &id, patch).await?)
}

/// DELETE /api/mentorships/:id - Delete a mentorship.
pub async fn delete_mentorship(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    delete_record(&state, COLLECTION, "Mentorship", &id).await?;
    ok_message((), "Mentorship deleted")
}

fn validate_mentorship(request: &CreateMentorshipRequest) -> Result<(), AppError> {
    if request.mentor_id.trim().is_empty() {
        return Err(AppError::Validation("mentorId is required".to_string()));
    }
    if request.mentee_id.trim().is_empty() {
        return Err(AppError::Validation("menteeId is required".to_string()));
    }
    Ok(())
}
