use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use timeseries_core::config::LayeredConfig;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timeseries_api::{create_router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timeseries_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let layered = match LayeredConfig::load() {
        Ok(layered) => layered,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            tracing::error!(
                "Remediation:\n\
                1. Check that TIMESERIES_CONFIG points to a readable file\n\
                2. Verify the file is valid TOML"
            );
            std::process::exit(1);
        }
    };
    let mut settings: Vec<_> = layered.to_inspection_map().into_iter().collect();
    settings.sort_by(|a, b| a.0.cmp(&b.0));
    for (key, (value, source)) in settings {
        tracing::debug!(key = %key, value = %value, source = ?source, "Configuration value");
    }

    let config = ApiConfig::from_layered(layered);

    tracing::info!(
        port = config.port,
        base_path = %config.base_path,
        datasets = config.catalog.len(),
        "Starting timeseries API server"
    );
    if config.catalog.is_empty() {
        tracing::warn!("No datasets configured; every timeseries request will return 404");
    }

    let cors_origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", config.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let state = Arc::new(AppState::new(config.catalog.clone()));
    let app = create_router(state, &config.base_path)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    axum::serve(listener, app).await?;

    Ok(())
}
