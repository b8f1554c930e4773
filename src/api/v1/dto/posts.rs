/*
 * Responsibility
 * - Posts の request/response DTO
 * - request は {"post": {...}} と flat {...} の両方を受ける
 * - response は {record} / {records, total_results} / {record, errors}
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::post_repo::PostRow;
use crate::services::{
    posts::{PostAttrs, PostDraft},
    validation::ValidationErrors,
};

#[derive(Debug, Default, Deserialize)]
pub struct PostParams {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PostPayload {
    // Order matters: untagged tries variants top to bottom.
    Wrapped { post: PostParams },
    Flat(PostParams),
}

impl From<PostPayload> for PostAttrs {
    fn from(payload: PostPayload) -> Self {
        let params = match payload {
            PostPayload::Wrapped { post } => post,
            PostPayload::Flat(params) => params,
        };
        PostAttrs {
            title: params.title,
            content: params.content,
        }
    }
}

/// A post as it appears in JSON. Unsaved posts have `null` id and timestamps.
#[derive(Debug, Serialize)]
pub struct PostRecord {
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<PostDraft> for PostRecord {
    fn from(draft: PostDraft) -> Self {
        Self {
            id: draft.id,
            title: draft.title,
            content: draft.content,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        }
    }
}

impl From<PostRow> for PostRecord {
    fn from(row: PostRow) -> Self {
        PostDraft::from(row).into()
    }
}

#[derive(Debug, Serialize)]
pub struct RecordResponse {
    pub record: PostRecord,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub records: Vec<PostRecord>,
    pub total_results: usize,
}

#[derive(Debug, Serialize)]
pub struct InvalidResponse {
    pub record: PostRecord,
    pub errors: ValidationErrors,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_wrapped_and_flat_payloads() {
        let wrapped: PostPayload =
            serde_json::from_str(r#"{"post": {"title": "T", "content": "C"}}"#).unwrap();
        let attrs = PostAttrs::from(wrapped);
        assert_eq!(attrs.title.as_deref(), Some("T"));
        assert_eq!(attrs.content.as_deref(), Some("C"));

        let flat: PostPayload = serde_json::from_str(r#"{"content": "only body"}"#).unwrap();
        let attrs = PostAttrs::from(flat);
        assert_eq!(attrs.title, None);
        assert_eq!(attrs.content.as_deref(), Some("only body"));
    }

    #[test]
    fn unsaved_record_serializes_nulls() {
        let record = PostRecord::from(PostDraft {
            title: "T".into(),
            ..PostDraft::default()
        });

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": null,
                "title": "T",
                "content": "",
                "created_at": null,
                "updated_at": null
            })
        );
    }
}
