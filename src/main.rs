//! Books API server: opens the database, registers tables, serves until Ctrl-C.

use books_api::{app, connect, register_tables, AppConfig, AppState, RecordStore};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("books_api=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = connect(&config).await?;
    let store = RecordStore::new(pool.clone());
    register_tables(&store).await?;

    let listener = TcpListener::bind(config.bind_addr.as_str()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(AppState::new(store)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("database closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
