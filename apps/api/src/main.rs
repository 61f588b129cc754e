use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use beo_api::config::Config;
use beo_api::routes::build_router;
use beo_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("beo_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting BEO API v{}", env!("CARGO_PKG_VERSION"));

    let policy = config.load_policy()?;
    info!(
        "Quantity policy {} loaded ({} tier bands, source: {})",
        policy.version,
        policy.tier_bands.len(),
        config
            .policy_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    );
    info!(
        "Layout budgets: first page {} lines, continuation {} lines, section overhead {}",
        config.layout.first_page_budget,
        config.layout.continuation_page_budget,
        config.layout.section_overhead_lines
    );

    let state = AppState::new(config.clone(), policy);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the print front-end has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
