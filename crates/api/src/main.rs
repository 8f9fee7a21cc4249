//! screener-api - HTTP screening service.

use std::net::SocketAddr;

use anyhow::Context;
use screener_api::{routes, AppContext};
use screener_engine::ScreeningConfig;
use screener_store::DbConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "screener_api=info,screener_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = DbConfig::from_env().context("database configuration")?;
    let config = ScreeningConfig {
        token_sort: env_flag("SCREENER_TOKEN_SORT"),
        ..ScreeningConfig::default()
    };
    tracing::info!(token_sort = config.token_sort, "screening configuration loaded");

    let context = AppContext::connect(&db, config)
        .await
        .context("connecting to database")?;
    let app = routes::router(context);

    let bind = std::env::var("SCREENER_BIND").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address {bind}"))?;
    tracing::info!("screening service listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
        .unwrap_or(false)
}
