mod config;

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use insight_api::AppStateInner;
use insight_api::countries::CountryClient;
use insight_store::Store;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "insight=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    if config.jwt_secret == "dev-secret-change-me" {
        warn!("INSIGHT_JWT_SECRET is not set; using the development secret");
    }

    // Accounts live in SQLite, content in memory
    let db = insight_db::Database::open(&config.db_path)?;
    let store = Arc::new(Store::new());
    if config.seed {
        insight_store::seed::seed(&store)?;
    }

    let state = Arc::new(AppStateInner {
        store,
        users: Arc::new(db),
        jwt_secret: config.jwt_secret.clone(),
        countries: CountryClient::new(&config.countries_url)?,
    });

    let app = insight_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr()?;
    info!("Insight server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
