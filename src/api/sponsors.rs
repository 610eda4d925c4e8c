//! Sponsor API endpoints.

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
use crate::models::{new_record_id, now_iso, CreateSponsorRequest};
use crate::store::query::FilterSpec;
use crate::AppState;

const COLLECTION: &str = "sponsors";

/// List parameters for sponsors. `tier` is exact-match; `q` searches name
/// and description.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub q: Option<String>,
    pub tier: Option<String>,
}

/// GET /api/sponsors - List sponsors.
pub async fn list_sponsors(
    State(state): State<AppState>,
    Query(params): Query<SponsorListParams>,
) -> ApiResult<Vec<Value>> {
    let filter = FilterSpec::new()
        .exact("tier", params.tier.as_deref())
        .search(&["name", "description"], params.q.as_deref());

    let query = list_query(params.page, params.limit, params.sort, params.order, filter);
    let page = state.backend.list(COLLECTION, &query).await?;
    page_response(page)
}

/// GET /api/sponsors/:id - Get a single sponsor.
pub async fn get_sponsor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    ok(fetch_record(&state, COLLECTION, "Sponsor", &id).await?)
}

/// POST /api/sponsors - Create a new sponsor.
pub async fn create_sponsor(
    State(state): State<AppState>,
    Json(request): Json<CreateSponsorRequest>,
) -> ApiResult<Value> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let sponsor = request.into_sponsor(new_record_id(), now_iso());
    let record = create_record(&state, COLLECTION, &sponsor).await?;
    ok_message(record, "Sponsor created")
}

/// PUT /api/sponsors/:id - Replace a sponsor, preserving id and createdAt.
pub async fn update_sponsor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateSponsorRequest>,
) -> ApiResult<Value> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let existing = fetch_record(&state, COLLECTION, "Sponsor", &id).await?;
    let sponsor = request.into_sponsor(id.clone(), created_at_of(&existing));
    let record = replace_record(&state, COLLECTION, "Sponsor", &id, &sponsor).await?;
    ok(record)
}

/// PATCH /api/sponsors/:id - Shallow-merge fields into a sponsor.
pub async fn patch_sponsor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> ApiResult<Value> {
    ok(merge_record(&state, COLLECTION, "Sponsor", &id, patch).await?)
}

/// DELETE /api/sponsors/:id - Delete a sponsor.
pub async fn delete_sponsor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    delete_record(&state, COLLECTION, "Sponsor", &id).await?;
    ok_message((), "Sponsor deleted")
}
