use std::sync::Arc;

use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use shopchat_api::{build_router, config::Config, state::AppState};
use shopchat_catalog::{CatalogClient, ShopifyClient};
use shopchat_llm::GeminiClient;
use shopchat_recommend::Recommender;
use shopchat_session::SessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting shopchat API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    let catalog: Arc<dyn CatalogClient> = Arc::new(ShopifyClient::new(
        config.store.domain.clone(),
        &config.shopify_access_token,
        &config.store.api_version,
    )?);

    let llm = Arc::new(GeminiClient::new(
        config.gemini_api_key.clone(),
        config.llm.model.clone(),
    )?);

    let store = Arc::new(Mutex::new(SessionStore::load(&config.session.file)));
    tracing::info!(file = %config.session.file, "Session store loaded");

    let recommender = Recommender::new(
        store.clone(),
        catalog.clone(),
        llm,
        config.store.domain.clone(),
    );

    let state = Arc::new(AppState::new(config.clone(), catalog, store, recommender));

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
