use anyhow::Context;

use campusdesk_api::{app, config::ApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    campusdesk_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let services = app::services::AccessServices::from_config(&config)
        .context("refusing to start with an unsafe access policy")?;

    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
