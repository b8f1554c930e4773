/*
 * Responsibility
 * - HTML 側の URL 構造を定義
 * - / は posts index か welcome (ROOT_PAGE で切り替え)
 * - POST /posts/{post_id} は _method による update/destroy
 */
use axum::{Router, routing::get};

use crate::config::RootPage;
use crate::state::AppState;
use crate::web::handlers::{posts, welcome};

pub fn routes(root_page: RootPage) -> Router<AppState> {
    let root = match root_page {
        RootPage::Posts => get(posts::index),
        RootPage::Welcome => get(welcome::index),
    };

    Router::new()
        .route("/", root)
        .route("/welcome", get(welcome::index))
        .route("/posts", get(posts::index).post(posts::create))
        .route("/posts/new", get(posts::new))
        .route(
            "/posts/{post_id}",
            get(posts::show)
                .post(posts::member)
                .put(posts::update)
                .patch(posts::update)
                .delete(posts::destroy),
        )
        .route("/posts/{post_id}/edit", get(posts::edit))
}
