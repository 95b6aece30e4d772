use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    adapters::outbound::PostgresProjectRepository, app_state::AppState,
    domain::services::ProjectServiceImpl,
};

mod adapters;
mod app_state;
mod config;
mod domain;
mod pages;
mod router;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_api=debug,tower_http=debug".into()),
        )
        .init();

    let config = config::read_config().context("failed to read configuration")?;

    let connection_pool = PgPoolOptions::new().connect_lazy_with(config.database.with_db());
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .context("failed to run database migrations")?;

    let repository = PostgresProjectRepository::new(connection_pool);
    let project_service = ProjectServiceImpl::new(Arc::new(repository));
    let app_state = AppState::new(
        Arc::new(project_service),
        config.application.site_name.clone(),
    );
    let app = router::create(app_state, &config);

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!("listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("failed to install terminate handler: {e}");
                std::future::pending::<()>().await
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
