//! User API endpoints.

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
use crate::models::{new_record_id, now_iso, CreateUserRequest};
use crate::store::query::FilterSpec;
use crate::AppState;

const COLLECTION: &str = "users";

/// List parameters for users. `role`, `chapterId`, and `active` are
/// exact-match; `q` searches name and email.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub q: Option<String>,
    pub role: Option<String>,
    pub chapter_id: Option<String>,
    pub active: Option<String>,
}

/// GET /api/users - List users.
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<UserListParams>,
) -> ApiResult<Vec<Value>> {
    let filter = FilterSpec::new()
        .exact("role", params.role.as_deref())
        .exact("chapterId", params.chapter_id.as_deref())
        .exact("active", params.active.as_deref())
        .search(&["name", "email"], params.q.as_deref());

    let query = list_query(params.page, params.limit, params.sort, params.order, filter);
    let page = state.backend.list(COLLECTION, &query).await?;
    page_response(page)
}

/// GET /api/users/:id - Get a single user.
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    ok(fetch_record(&state, COLLECTION, "User", &id).await?)
}

/// POST /api/users - Create a new user.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<Value> {
    validate_user(&request)?;

    let user = request.into_user(new_record_id(), now_iso());
    let record = create_record(&state, COLLECTION, &user).await?;
    ok_message(record, "User created")
}

/// PUT /api/users/:id - Replace a user, preserving id and createdAt.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<Value> {
    validate_user(&request)?;

    let existing = fetch_record(&state, COLLECTION, "User", &id).await?;
    let user = request.into_user(id.clone(), created_at_of(&existing));
    let record = replace_record(&state, COLLECTION, "User", &id, &user).await?;
    ok(record)
}

/// PATCH /api/users/:id - Shallow-merge fields into a user.
pub async fn patch_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> ApiResult<Value> {
    ok(merge_record(&state, COLLECTION, "User", &id, patch).await?)
}

/// DELETE /api/users/:id - Delete a user.
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    delete_record(&state, COLLECTION, "User", &id).await?;
    ok_message((), "User deleted")
}

fn validate_user(request: &CreateUserRequest) -> Result<(), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if request.email.trim().is_empty() || !request.email.contains('@') {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    Ok(())
}
