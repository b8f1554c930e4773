/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - db: SqlitePool, 画面表示オプション
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use sqlx::SqlitePool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: SqlitePool,
    pub rich_text_editor: bool,
}

impl AppState {
    pub fn new(db: SqlitePool, rich_text_editor: bool) -> Self {
        Self {
            db,
            rich_text_editor,
        }
    }
}
