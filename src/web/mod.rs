/*
 * Responsibility
 * - HTML (server-rendered) 側の公開ポイント
 * - JSON API (crate::api) と同じ services を使い、表現だけが違う
 */
pub mod form;
pub mod handlers;
mod routes;

pub use routes::routes;
