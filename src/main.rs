use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};

use freshstock_api as api;
use api::logging::{DbLogSink, LogSink};

/// FreshStock inventory service
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Apply pending migrations and exit
    #[arg(long)]
    migrate_only: bool,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = api::config::load_config().context("failed to load configuration")?;
    if let Some(port) = cli.port {
        cfg.port = port;
    }
    api::config::init_tracing(&cfg.log_level, cfg.log_json);

    // Init DB
    let db_pool = api::db::establish_connection_from_app_config(&cfg)
        .await
        .context("failed to connect to the database")?;

    if cfg.auto_migrate || cli.migrate_only {
        api::db::run_migrations(&db_pool).await.map_err(|e| {
            error!("Failed running migrations: {}", e);
            e
        })?;
    }
    if cli.migrate_only {
        info!("Migrations applied; exiting");
        return Ok(());
    }

    let db = Arc::new(db_pool);

    let sink: Option<Arc<dyn LogSink>> = if cfg.persist_event_log {
        Some(Arc::new(DbLogSink::new(db.as_ref().clone())))
    } else {
        None
    };
    if !api::logging::init_event_logger(sink) {
        warn!("Event logger was already initialised");
    }
    info!(
        persisted = api::logging::event_logger().has_sink(),
        "Event logger ready"
    );

    let addr = cfg.bind_address();
    let state = api::AppState::new(db.clone(), cfg);
    let app = api::app_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("freshstock-api listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Ok(pool) = Arc::try_unwrap(db) {
        api::db::close_pool(pool).await?;
    }
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("failed to install SIGTERM handler: {}", err);
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
}
