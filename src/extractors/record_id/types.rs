/**
 * Responsibility
 *  - surface (JSON API / HTML) ごとの ID 型 alias
 */
use super::core::RecordId;
use crate::error::{AppError, PageError};

// posts
pub type ApiPostId = RecordId<AppError>;
pub type PagePostId = RecordId<PageError>;
