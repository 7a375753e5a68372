use std::sync::Arc;
use std::time::Duration;

use cinematch_api::{
    config::Config,
    db::{self, CollectionStore, SessionStore},
    routes::create_router,
    services::{providers::kinopoisk::KinopoiskProvider, providers::CatalogProvider, PairSessionService},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = db::create_pool(&config.database_url).await?;
    db::init_schema(&pool).await?;

    let catalog: Arc<dyn CatalogProvider> = Arc::new(KinopoiskProvider::new(
        config.kinopoisk_api_key.clone(),
        config.kinopoisk_api_url.clone(),
        Duration::from_secs(config.catalog_timeout_secs),
    )?);

    let sessions = PairSessionService::new(
        SessionStore::new(pool.clone()),
        catalog.clone(),
        config.search_year,
    );
    let collections = CollectionStore::new(pool);

    let state = AppState::new(sessions, collections, catalog);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
