use std::sync::Arc;

use anyhow::Context;

use storefront_api::app::{self, services::AppServices};
use storefront_api::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env()?;
    storefront_observability::init(config.log_format);

    let services = Arc::new(AppServices::in_memory());
    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
