use anyhow::Context;
use badge_server::build_router;
use badge_server::config::AppConfig;
use badge_server::state::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::load().context("Failed to load config")?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(
        endpoint = %config.repository.endpoint_url,
        root = %config.repository.repository_root,
        "Repository configured"
    );

    let state = AppState::new(config).context("Failed to initialize resolver")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Badge server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
