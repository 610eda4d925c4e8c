//! Partner API endpoints.

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
use crate::models::{new_record_id, now_iso, CreatePartnerRequest};
use crate::store::query::FilterSpec;
use crate::AppState;

const COLLECTION: &str = "partners";

/// List parameters for partners. `status` is exact-match; `industry` is a
/// substring match; `q` searches name and description.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub q: Option<String>,
    pub status: Option<String>,
    pub industry: Option<String>,
}

/// GET /api/partners - List partners.
pub async fn list_partners(
    State(state): State<AppState>,
    Query(params): Query<PartnerListParams>,
) -> ApiResult<Vec<Value>> {
    let filter = FilterSpec::new()
        .exact("status", params.status.as_deref())
        .contains("industry", params.industry.as_deref())
        .search(&["name", "description"], params.q.as_deref());

    let query = list_query(params.page, params.limit, params.sort, params.order, filter);
    let page = state.backend.list(COLLECTION, &query).await?;
    page_response(page)
}

/// GET /api/partners/:id - Get a single partner.
pub async fn get_partner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    ok(fetch_record(&state, COLLECTION, "Partner", &id).await?)
}

/// POST /api/partners - Create a new partner.
pub async fn create_partner(
    State(state): State<AppState>,
    Json(request): Json<CreatePartnerRequest>,
) -> ApiResult<Value> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let partner = request.into_partner(new_record_id(), now_iso());
    let record = create_record(&state, COLLECTION, &partner).await?;
    ok_message(record, "Partner created")
}

/// PUT /api/partners/:id - Replace a partner, preserving id and createdAt.
pub async fn update_partner(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreatePartnerRequest>,
) -> ApiResult<Value> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let existing = fetch_record(&state, COLLECTION, "Partner", &id).await?;
    let partner = request.into_partner(id.clone(), created_at_of(&existing));
    let record = replace_record(&state, COLLECTION, "Partner", &id, &partner).await?;
    ok(record)
}

/// PATCH /api/partners/:id - Shallow-merge fields into a partner.
pub async fn patch_partner(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> ApiResult<Value> {
    ok(merge_record(&state, COLLECTION, "Partner", &id, patch).await?)
}

/// DELETE /api/partners/:id - Delete a partner.
pub async fn delete_partner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    delete_record(&state, COLLECTION, "Partner", &id).await?;
    ok_message((), "Partner deleted")
}
