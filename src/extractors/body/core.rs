/*
 * Responsibility
 * - axum の Json / Form を包み、body の rejection を AppError (400 INVALID_BODY) に揃える
 * - content-type 不一致 / 壊れた JSON / 型不一致 はどれも validation (422) とは区別する
 * - rejection の表現 (JSON / HTML) は型引数 E で選ぶ
 */
use std::marker::PhantomData;

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    response::IntoResponse,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

const INVALID_BODY: &str = "INVALID_BODY";

pub struct JsonBody<T, E> {
    pub value: T,
    _rejection: PhantomData<fn() -> E>,
}

pub struct FormBody<T, E> {
    pub value: T,
    _rejection: PhantomData<fn() -> E>,
}

fn invalid_body(message: String) -> AppError {
    tracing::debug!(%message, "request body rejected");
    AppError::bad_request(INVALID_BODY, message)
}

impl<S, T, E> FromRequest<S> for JsonBody<T, E>
where
    S: Send + Sync,
    T: DeserializeOwned,
    E: From<AppError> + IntoResponse,
{
    type Rejection = E;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| E::from(invalid_body(rejection.body_text())))?;
        Ok(Self {
            value,
            _rejection: PhantomData,
        })
    }
}

impl<S, T, E> FromRequest<S> for FormBody<T, E>
where
    S: Send + Sync,
    T: DeserializeOwned,
    E: From<AppError> + IntoResponse,
{
    type Rejection = E;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| E::from(invalid_body(rejection.body_text())))?;
        Ok(Self {
            value,
            _rejection: PhantomData,
        })
    }
}
