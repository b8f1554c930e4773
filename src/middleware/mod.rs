/*
 * Responsibility
 * - middleware の公開インターフェース
 * - 各 apply(...) は app.rs の Router 組み立てから呼ぶ
 */
pub mod catch_panic;
pub mod cors;
pub mod http;
pub mod security_headers;
