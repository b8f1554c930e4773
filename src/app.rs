/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - DB 接続 → schema 作成 → 依存生成 → Router 組み立て
 * - Middleware の適用 (request id / trace / timeout / security headers / CORS / panic → 500)
 * - axum::serve() で起動し、Ctrl-C / SIGTERM で graceful shutdown
 */
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    db,
    error::{AppError, PageError},
    middleware,
    pidfile::PidFile,
    state::AppState,
    web,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,hello_blog=debug,sqlx=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched.
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run(config: Config) -> Result<()> {
    init_tracing();
    init_panic_hook(config.abort_on_panic);

    tracing::info!(
        env = config.app_env.as_str(),
        addr = %config.addr,
        workers = config.worker_threads,
        db_pool_min = config.db_min_connections,
        db_pool_max = config.db_max_connections,
        "starting server"
    );

    let db = db::connect(&config).await?;
    db::migrate(&db).await?;

    let state = AppState::new(db.clone(), config.rich_text_editor);
    let app = build_router(state, &config);

    let _pidfile = PidFile::create(&config.pidfile)?;
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("goodbye");
    Ok(())
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let api = api::v1::routes().fallback(|| async { AppError::not_found("route") });
    let api = middleware::cors::apply(middleware::catch_panic::json(api), config);
    let web = middleware::catch_panic::html(web::routes(config.root_page));

    let router = Router::new()
        .merge(web)
        .nest("/api/v1", api)
        .fallback(|| async { PageError(AppError::not_found("page")) })
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    middleware::http::apply(router, config.request_timeout)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("gracefully stopping, waiting for requests to finish");
}
