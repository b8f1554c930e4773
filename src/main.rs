/*
 * Responsibility
 * - Config を読み、そのサイズで tokio runtime を組み立てる
 * - app::run() の呼び出し（ロジックは置かない）
 */
use anyhow::Result;

mod api;
mod app;
mod config;
mod db;
mod error;
mod extractors;
mod middleware;
mod pidfile;
mod repos;
mod services;
mod state;
mod views;
mod web;

fn main() -> Result<()> {
    let config = config::Config::from_env()?;

    // WEB_CONCURRENCY sizes the worker pool, so the runtime is built by hand
    // instead of through #[tokio::main].
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(app::run(config))
}
