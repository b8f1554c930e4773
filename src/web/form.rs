/*
 * Responsibility
 * - HTML form (application/x-www-form-urlencoded) の受け口
 * - post[title] / post[content] と、PATCH/DELETE を表す hidden の _method
 */
use serde::Deserialize;

use crate::services::posts::PostAttrs;

#[derive(Debug, Default, Deserialize)]
pub struct PostForm {
    #[serde(rename = "post[title]")]
    pub title: Option<String>,
    #[serde(rename = "post[content]")]
    pub content: Option<String>,
    #[serde(rename = "_method")]
    pub method: Option<String>,
}

/// What a `POST /posts/{id}` form actually asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodOverride {
    Update,
    Destroy,
}

impl PostForm {
    pub fn method_override(&self) -> Option<MethodOverride> {
        match self.method.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("patch" | "put") => Some(MethodOverride::Update),
            Some("delete") => Some(MethodOverride::Destroy),
            _ => None,
        }
    }

    pub fn into_attrs(self) -> PostAttrs {
        PostAttrs {
            title: self.title,
            content: self.content,
        }
    }
}
