// ============================
// signup-backend-bin/src/main.rs
// ============================
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use signup_backend_lib::{
    config,
    notifier::LogNotifier,
    router,
    store::FlatFileStore,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = config::load_settings()?;

    // RUST_LOG wins over the configured level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let bind_addr = settings.bind_addr;
    let store = Arc::new(FlatFileStore::new(&settings.data_dir)?);
    let notifier = Arc::new(LogNotifier);

    let state = Arc::new(AppState::new(store, notifier, settings));
    let app = router::create_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %bind_addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
