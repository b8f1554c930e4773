/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /posts
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::{
    health::health,
    posts::{create_post, delete_post, edit_post, get_post, list_posts, new_post, update_post},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/new", get(new_post))
        .route(
            "/posts/{post_id}",
            get(get_post)
                .put(update_post)
                .patch(update_post)
                .delete(delete_post),
        )
        .route("/posts/{post_id}/edit", get(edit_post))
}
