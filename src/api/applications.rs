//! Application API endpoints.

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
use crate::models::{new_record_id, now_iso, CreateApplicationRequest};
use crate::store::query::FilterSpec;
use crate::AppState;

const COLLECTION: &str = "applications";

/// List parameters for applications. All filters are exact-match; `q`
/// searches the applicant name and email.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub q: Option<String>,
    pub status: Option<String>,
    pub opportunity_id: Option<String>,
    pub applicant_id: Option<String>,
}

/// GET /api/applications - List applications.
pub async fn list_applications(
    State(state): State<AppState>,
    Query(params): Query<ApplicationListParams>,
) -> ApiResult<Vec<Value>> {
    let filter = FilterSpec::new()
        .exact("status", params.status.as_deref())
        .exact("opportunityId", params.opportunity_id.as_deref())
        .exact("applicantId", params.applicant_id.as_deref())
        .search(&["applicantName", "applicantEmail"], params.q.as_deref());

    let query = list_query(params.page, params.limit, params.sort, params.order, filter);
    let page = state.backend.list(COLLECTION, &query).await?;
    page_response(page)
}

/// GET /api/applications/:id - Get a single application.
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    ok(fetch_record(&state, COLLECTION, "Application", &id).await?)
}

/// POST /api/applications - Submit a new application.
pub async fn create_application(
    State(state): State<AppState>,
    Json(request): Json<CreateApplicationRequest>,
) -> ApiResult<Value> {
    if request.opportunity_id.trim().is_empty() {
        return Err(AppError::Validation("opportunityId is required".to_string()));
    }

    let application = request.into_application(new_record_id(), now_iso());
    let record = create_record(&state, COLLECTION, &application).await?;
    ok_message(record, "Application submitted")
}

/// PUT /api/applications/:id - Replace an application, preserving id and createdAt.
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateApplicationRequest>,
) -> ApiResult<Value> {
    if request.opportunity_id.trim().is_empty() {
        return Err(AppError::Validation("opportunityId is required".to_string()));
    }

    let existing = fetch_record(&state, COLLECTION, "Application", &id).await?;
    let application = request.into_application(id.clone(), created_at_of(&existing));
    let record = replace_record(&state, COLLECTION, "Application", &id, &application).await?;
    ok(record)
}

/// PATCH /api/applications/:id - Shallow-merge fields into an application.
pub async fn patch_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> ApiResult<Value> {
    ok(merge_record(&state, COLLECTION, "Application", &id, patch).await?)
}

/// DELETE /api/applications/:id - Delete an application.
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    delete_record(&state, COLLECTION, "Application", &id).await?;
    ok_message((), "Application deleted")
}
