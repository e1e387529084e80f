use anyhow::Context;
use std::sync::Arc;
use wikibot::api::{AppState, create_router};
use wikibot::commands::CommandRegistry;
use wikibot::config::Config;
use wikibot::search::WikiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Also picks up log crate records from the library modules.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    if let Some(domain) = &config.domain {
        tracing::info!("serving chat domain: {domain}");
    }

    let registry = CommandRegistry::with_defaults(Arc::new(WikiClient::new()));
    tracing::info!("registered commands: {:?}", registry.commands());

    let port = config.port;
    let state = Arc::new(AppState::new(registry, config));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;

    tracing::info!(
        "{} {} started on port {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        port
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
