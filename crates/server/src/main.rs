use std::error::Error;

use server::db::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    server::telemetry::init_tracing();

    let settings = server::config::load_settings()?;

    if settings.features.telemetry {
        server::telemetry::init_telemetry()?;
    }
    server::health::record_start_time();

    let repo = server::db::build_repository(settings).await?;

    if settings.features.seed_demo_data {
        server::seed::seed_if_empty(repo.as_ref()).await?;
    }

    let state = AppState::new(repo, settings.storage_mode);
    let router = server::openapi::app(state, settings.features.telemetry);

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
