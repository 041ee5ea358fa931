#![forbid(unsafe_code)]

use contacts_core::db::open_db;
use contacts_core::{init_logging, CategorySeed};
use contacts_web::{build_router, AppState, WebConfig};
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = WebConfig::from_env()?;
    init_logging(&config.log_level, config.log_dir.as_deref())?;

    let conn = open_db(&config.db_path)?;
    let state = AppState::initialize(conn, &CategorySeed::defaults())?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(
        "event=http_listen module=web status=ok addr={} db_path={}",
        config.bind,
        config.db_path.display()
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("event=http_stop module=web status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        log::warn!("event=http_stop module=web status=error reason=signal_handler_unavailable");
        std::future::pending::<()>().await;
    }
}
