/*
 * Responsibility
 * - HTML view の公開 (layout + 各画面)
 * - 文字列組み立ては html::Html に閉じ込める
 */
pub mod errors;
pub mod html;
pub mod layout;
pub mod posts;
pub mod welcome;
