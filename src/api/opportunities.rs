//! Opportunity API endpoints.

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
use crate::models::{new_record_id, now_iso, CreateOpportunityRequest};
use crate::store::query::FilterSpec;
use crate::AppState;

const COLLECTION: &str = "opportunities";

/// List parameters for opportunities. `type`, `status`, and `partnerId` are
/// exact-match; `location` is a substring match; `q` searches title and
/// description.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub partner_id: Option<String>,
    pub location: Option<String>,
}

/// GET /api/opportunities - List opportunities.
pub async fn list_opportunities(
    State(state): State<AppState>,
    Query(params): Query<OpportunityListParams>,
) -> ApiResult<Vec<Value>> {
    let filter = FilterSpec::new()
        .exact("type", params.kind.as_deref())
        .exact("status", params.status.as_deref())
        .exact("partnerId", params.partner_id.as_deref())
        .contains("location", params.location.as_deref())
        .search(&["title", "description"], params.q.as_deref());

    let query = list_query(params.page, params.limit, params.sort, params.order, filter);
    let page = state.backend.list(COLLECTION, &query).await?;
    page_response(page)
}

/// GET /api/opportunities/:id - Get a single opportunity.
pub async fn get_opportunity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    ok(fetch_record(&state, COLLECTION, "Opportunity", &id).await?)
}

/// POST /api/opportunities - Create a new opportunity.
pub async fn create_opportunity(
    State(state): State<AppState>,
    Json(request): Json<CreateOpportunityRequest>,
) -> ApiResult<Value> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    let opportunity = request.into_opportunity(new_record_id(), now_iso());
    let record = create_record(&state, COLLECTION, &opportunity).await?;
    ok_message(record, "Opportunity created")
}

/// PUT /api/opportunities/:id - Replace an opportunity, preserving id and createdAt.
pub async fn update_opportunity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateOpportunityRequest>,
) -> ApiResult<Value> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    let existing = fetch_record(&state, COLLECTION, "Opportunity", &id).await?;
    let opportunity = request.into_opportunity(id.clone(), created_at_of(&existing));
    let record = replace_record(&state, COLLECTION, "Opportunity", &id, &opportunity).await?;
    ok(record)
}

/// PATCH /api/opportunities/:id - Shallow-merge fields into an opportunity.
pub async fn patch_opportunity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> ApiResult<Value> {
    ok(merge_record(&state, COLLECTION, "Opportunity", &id, patch).await?)
}

/// DELETE /api/opportunities/:id - Delete an opportunity.
pub async fn delete_opportunity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    delete_record(&state, COLLECTION, "Opportunity", &id).await?;
    ok_message((), "Opportunity deleted")
}

/// POST /api/opportunities/:id/close - Mark an opportunity as closed.
pub async fn close_opportunity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let patch = json!({ "status": "closed" });
    let record = merge_record(&state, COLLECTION, "Opportunity", &id, patch).await?;
    ok_message(record, "Opportunity closed")
}
