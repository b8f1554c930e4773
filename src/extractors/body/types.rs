/**
 * Responsibility
 *  - surface (JSON API / HTML) ごとの request body 型 alias
 */
use super::core::{FormBody, JsonBody};
use crate::error::{AppError, PageError};

pub type ApiJson<T> = JsonBody<T, AppError>;
pub type PageForm<T> = FormBody<T, PageError>;
