/*
 * Responsibility
 * - /posts 系 HTML handler (index / new / create / show / edit / update / destroy)
 * - 成功時は redirect (303)、validation 失敗時は 422 で form を再描画
 * - not found / DB error は PageError で HTML の error page にする
 */
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    error::{AppError, PageError},
    extractors::{body::PageForm, record_id::PagePostId},
    services::{
        posts::{self, PostDraft, ServiceError},
        validation::ValidationErrors,
    },
    state::AppState,
    views::{
        self,
        posts::{FormOptions, post_path, posts_path},
    },
    web::form::{MethodOverride, PostForm},
};

fn form_options(state: &AppState) -> FormOptions {
    FormOptions {
        rich_text_editor: state.rich_text_editor,
    }
}

fn render_form(state: &AppState, post: &PostDraft, errors: &ValidationErrors) -> Html<String> {
    Html(views::posts::form(post, errors, &form_options(state)))
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let rows = posts::list(&state.db).await?;

    Ok(Html(views::posts::index("Posts", &rows)))
}

pub async fn new(State(state): State<AppState>) -> Html<String> {
    render_form(&state, &PostDraft::default(), &ValidationErrors::new())
}

pub async fn create(
    State(state): State<AppState>,
    form: PageForm<PostForm>,
) -> Result<Response, PageError> {
    match posts::create(&state.db, form.value.into_attrs()).await {
        Ok(_) => Ok(Redirect::to(&posts_path()).into_response()),
        Err(ServiceError::Invalid(rejected)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            render_form(&state, &rejected.post, &rejected.errors),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}

pub async fn show(
    State(state): State<AppState>,
    post_id: PagePostId,
) -> Result<Html<String>, PageError> {
    let row = posts::find(&state.db, post_id.id).await?;

    Ok(Html(views::posts::show(&row)))
}

pub async fn edit(
    State(state): State<AppState>,
    post_id: PagePostId,
) -> Result<Html<String>, PageError> {
    let row = posts::find(&state.db, post_id.id).await?;

    Ok(render_form(
        &state,
        &PostDraft::from(row),
        &ValidationErrors::new(),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    post_id: PagePostId,
    form: PageForm<PostForm>,
) -> Result<Response, PageError> {
    apply_update(&state, post_id.id, form.value).await
}

pub async fn destroy(
    State(state): State<AppState>,
    post_id: PagePostId,
) -> Result<Response, PageError> {
    apply_destroy(&state, post_id.id).await
}

/// `POST /posts/{id}`: HTML forms can only POST, so `_method` picks the action.
pub async fn member(
    State(state): State<AppState>,
    post_id: PagePostId,
    form: PageForm<PostForm>,
) -> Result<Response, PageError> {
    let form = form.value;
    match form.method_override() {
        Some(MethodOverride::Update) => apply_update(&state, post_id.id, form).await,
        Some(MethodOverride::Destroy) => apply_destroy(&state, post_id.id).await,
        None => Err(AppError::bad_request("INVALID_METHOD", "unsupported _method").into()),
    }
}

async fn apply_update(state: &AppState, id: i64, form: PostForm) -> Result<Response, PageError> {
    match posts::update(&state.db, id, form.into_attrs()).await {
        Ok(row) => Ok(Redirect::to(&post_path(row.id)).into_response()),
        Err(ServiceError::Invalid(rejected)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            render_form(state, &rejected.post, &rejected.errors),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}

async fn apply_destroy(state: &AppState, id: i64) -> Result<Response, PageError> {
    match posts::destroy(&state.db, id).await {
        Ok(_) => Ok(Redirect::to(&posts_path()).into_response()),
        Err(ServiceError::NotDestroyed(row)) => Ok(Redirect::to(&post_path(row.id)).into_response()),
        Err(e) => Err(e.into()),
    }
}
