/*
 * Responsibility
 * - Path の String を受け、内部 ID (i64) に変換する
 * - 数値でない / 範囲外の ID は「存在しない record」と同じく not found にする
 * - rejection の表現 (JSON / HTML) は型引数 E で選ぶ
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::IntoResponse,
};

use crate::error::AppError;

pub struct RecordId<E> {
    pub id: i64,
    _rejection: PhantomData<fn() -> E>,
}

impl<E> RecordId<E> {
    fn new(id: i64) -> Self {
        Self {
            id,
            _rejection: PhantomData,
        }
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

impl<S, E> FromRequestParts<S> for RecordId<E>
where
    S: Send + Sync,
    E: From<AppError> + IntoResponse,
{
    type Rejection = E;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| E::from(AppError::not_found("post")))?;
        let id = parse_id(&raw).ok_or_else(|| E::from(AppError::not_found("post")))?;
        Ok(Self::new(id))
    }
}

impl<E> std::fmt::Debug for RecordId<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordId").field("id", &self.id).finish()
    }
}
