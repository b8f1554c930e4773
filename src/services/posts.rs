/*
 * Responsibility
 * - posts の use case (create / update / destroy) と validation
 * - HTML handler と JSON handler の両方から呼ばれる
 * - validation 失敗時は保存せず、入力値 + errors を返す
 */
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::repos::{error::RepoError, post_repo, post_repo::PostRow};
use crate::services::validation::ValidationErrors;

/// Attributes submitted by a client. `None` means "not supplied".
#[derive(Debug, Clone, Default)]
pub struct PostAttrs {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A post as shown in a form or error payload; may not be persisted yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostDraft {
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PostDraft {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require_present("title", &self.title);
        errors.require_present("content", &self.content);
        errors
    }
}

impl From<PostRow> for PostDraft {
    fn from(row: PostRow) -> Self {
        Self {
            id: Some(row.id),
            title: row.title,
            content: row.content,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}

#[derive(Debug)]
pub struct Rejected {
    pub post: PostDraft,
    pub errors: ValidationErrors,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed")]
    Invalid(Box<Rejected>),
    #[error("post not found")]
    NotFound,
    #[error("post could not be deleted")]
    NotDestroyed(Box<PostRow>),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub async fn list(db: &SqlitePool) -> Result<Vec<PostRow>, ServiceError> {
    Ok(post_repo::list(db).await?)
}

pub async fn find(db: &SqlitePool, id: i64) -> Result<PostRow, ServiceError> {
    post_repo::get(db, id).await?.ok_or(ServiceError::NotFound)
}

pub async fn create(db: &SqlitePool, attrs: PostAttrs) -> Result<PostRow, ServiceError> {
    let draft = PostDraft {
        title: attrs.title.unwrap_or_default(),
        content: attrs.content.unwrap_or_default(),
        ..PostDraft::default()
    };

    let errors = draft.validate();
    if !errors.is_empty() {
        return Err(invalid(draft, errors));
    }

    let row = post_repo::create(db, &draft.title, &draft.content).await?;
    tracing::info!(post_id = row.id, "post created");
    Ok(row)
}

/// Omitted attributes keep their stored values. The stored row is untouched on failure.
pub async fn update(db: &SqlitePool, id: i64, attrs: PostAttrs) -> Result<PostRow, ServiceError> {
    let current = find(db, id).await?;

    let mut draft = PostDraft::from(current);
    if let Some(title) = &attrs.title {
        draft.title = title.clone();
    }
    if let Some(content) = &attrs.content {
        draft.content = content.clone();
    }

    let errors = draft.validate();
    if !errors.is_empty() {
        return Err(invalid(draft, errors));
    }

    // The row may have been deleted since `find`.
    let row = post_repo::update(db, id, attrs.title.as_deref(), attrs.content.as_deref())
        .await?
        .ok_or(ServiceError::NotFound)?;
    tracing::info!(post_id = row.id, "post updated");
    Ok(row)
}

/// Returns the deleted row.
pub async fn destroy(db: &SqlitePool, id: i64) -> Result<PostRow, ServiceError> {
    let current = find(db, id).await?;

    if post_repo::delete(db, id).await? {
        tracing::info!(post_id = id, "post deleted");
        Ok(current)
    } else {
        Err(ServiceError::NotDestroyed(Box::new(current)))
    }
}

fn invalid(post: PostDraft, errors: ValidationErrors) -> ServiceError {
    ServiceError::Invalid(Box::new(Rejected { post, errors }))
}
