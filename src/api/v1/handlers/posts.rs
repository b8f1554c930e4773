/*
 * Responsibility
 * - /api/v1/posts 系 CRUD handler (JSON)
 * - Path の {post_id} は ApiPostId extractor で i64 に変換して受け取る
 * - validation 失敗は 422 + {record, errors}、それ以外の失敗は AppError に任せる
 * - body が読めない request は ApiJson extractor が 400 INVALID_BODY にする
 */
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    api::v1::dto::posts::{InvalidResponse, ListResponse, PostPayload, PostRecord, RecordResponse},
    error::AppError,
    extractors::{body::ApiJson, record_id::ApiPostId},
    services::{
        posts::{self, PostDraft, ServiceError},
        validation::ValidationErrors,
    },
    state::AppState,
};

fn record(record: impl Into<PostRecord>) -> Json<RecordResponse> {
    Json(RecordResponse {
        record: record.into(),
    })
}

fn unprocessable(record: impl Into<PostRecord>, errors: ValidationErrors) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(InvalidResponse {
            record: record.into(),
            errors,
        }),
    )
        .into_response()
}

pub async fn list_posts(State(state): State<AppState>) -> Result<Json<ListResponse>, AppError> {
    let rows = posts::list(&state.db).await?;

    let records: Vec<PostRecord> = rows.into_iter().map(PostRecord::from).collect();
    Ok(Json(ListResponse {
        total_results: records.len(),
        records,
    }))
}

pub async fn new_post() -> Json<RecordResponse> {
    record(PostDraft::default())
}

pub async fn create_post(
    State(state): State<AppState>,
    payload: ApiJson<PostPayload>,
) -> Result<Response, AppError> {
    match posts::create(&state.db, payload.value.into()).await {
        Ok(row) => Ok((StatusCode::CREATED, record(row)).into_response()),
        Err(ServiceError::Invalid(rejected)) => {
            let rejected = *rejected;
            Ok(unprocessable(rejected.post, rejected.errors))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn get_post(
    State(state): State<AppState>,
    post_id: ApiPostId,
) -> Result<Json<RecordResponse>, AppError> {
    let row = posts::find(&state.db, post_id.id).await?;

    Ok(record(row))
}

pub async fn edit_post(
    State(state): State<AppState>,
    post_id: ApiPostId,
) -> Result<Json<RecordResponse>, AppError> {
    get_post(State(state), post_id).await
}

pub async fn update_post(
    State(state): State<AppState>,
    post_id: ApiPostId,
    payload: ApiJson<PostPayload>,
) -> Result<Response, AppError> {
    match posts::update(&state.db, post_id.id, payload.value.into()).await {
        Ok(row) => Ok(record(row).into_response()),
        Err(ServiceError::Invalid(rejected)) => {
            let rejected = *rejected;
            Ok(unprocessable(rejected.post, rejected.errors))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_post(
    State(state): State<AppState>,
    post_id: ApiPostId,
) -> Result<Response, AppError> {
    match posts::destroy(&state.db, post_id.id).await {
        Ok(row) => Ok(record(row).into_response()),
        Err(ServiceError::NotDestroyed(row)) => {
            let mut errors = ValidationErrors::new();
            errors.add("base", "Post could not be deleted");
            Ok(unprocessable(*row, errors))
        }
        Err(e) => Err(e.into()),
    }
}
