//! Q&A API endpoints.

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
use crate::models::{new_record_id, now_iso, AnswerQaRequest, CreateQaRequest};
use crate::store::query::FilterSpec;
use crate::AppState;

const COLLECTION: &str = "qa";

/// List parameters for Q&A. `answered` and `authorId` are exact-match;
/// `tag` matches any tag element; `q` searches question and body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub q: Option<String>,
    pub answered: Option<String>,
    pub author_id: Option<String>,
    pub tag: Option<String>,
}

/// GET /api/qa - List questions.
pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<QaListParams>,
) -> ApiResult<Vec<Value>> {
    let filter = FilterSpec::new()
        .exact("answered", params.answered.as_deref())
        .exact("authorId", params.author_id.as_deref())
        .exact("tags", params.tag.as_deref())
        .search(&["question", "body"], params.q.as_deref());

    let query = list_query(params.page, params.limit, params.sort, params.order, filter);
    let page = state.backend.list(COLLECTION, &query).await?;
    page_response(page)
}

/// GET /api/qa/:id - Get a single question.
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    ok(fetch_record(&state, COLLECTION, "Question", &id).await?)
}

/// POST /api/qa - Post a new question.
pub async fn create_question(
    State(state): State<AppState>,
    Json(request): Json<CreateQaRequest>,
) -> ApiResult<Value> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("Question is required".to_string()));
    }

    let question = request.into_question(new_record_id(), now_iso());
    let record = create_record(&state, COLLECTION, &question).await?;
    ok_message(record, "Question posted")
}

/// PUT /api/qa/:id - Replace a question, preserving id and createdAt.
pub async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateQaRequest>,
) -> ApiResult<Value> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("Question is required".to_string()));
    }

    let existing = fetch_record(&state, COLLECTION, "Question", &id).await?;
    let question = request.into_question(id.clone(), created_at_of(&existing));
    let record = replace_record(&state, COLLECTION, "Question", &id, &question).await?;
    ok(record)
}

/// PATCH /api/qa/:id - Shallow-merge fields into a question.
pub async fn patch_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> ApiResult<Value> {
    ok(merge_record(&state, COLLECTION, "Question", &id, patch).await?)
}

/// DELETE /api/qa/:id - Delete a question.
pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    delete_record(&state, COLLECTION, "Question", &id).await?;
    ok_message((), "Question deleted")
}

/// POST /api/qa/:id/answer - Record an answer on a question.
pub async fn answer_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AnswerQaRequest>,
) -> ApiResult<Value> {
    if request.answer.trim().is_empty() {
        return Err(AppError::Validation("Answer is required".to_string()));
    }

    let patch = json!({
        "answered": true,
        "answer": request.answer,
        "answeredBy": request.answered_by,
        "answeredAt": now_iso(),
    });
    let record = merge_record(&state, COLLECTION, "Question", &id, patch).await?;
    ok_message(record, "Answer recorded")
}
