use std::sync::Arc;
use std::net::SocketAddr;
use anyhow::Context;
use lome_api::{app, AppState};
use lome_booking::MessagingLink;
use lome_core::{DocumentStore, SystemClock};
use lome_store::{app_config::Config, DbClient, InMemoryDocumentStore, RedisClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lome_api=debug,lome_booking=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting LOME VR API on port {}", config.server.port);

    // Document store
    let store: Arc<dyn DocumentStore> = match &config.database.url {
        Some(url) => {
            let db = DbClient::new(url, config.database.max_connections)
                .await
                .context("Failed to connect to Postgres")?;
            db.migrate().await.context("Failed to run migrations")?;
            Arc::new(db)
        }
        None => {
            tracing::warn!("No database configured, documents are kept in memory only");
            Arc::new(InMemoryDocumentStore::new())
        }
    };

    // Redis Connection (rate limiting only)
    let redis = match &config.redis.url {
        Some(url) => Some(Arc::new(
            RedisClient::new(url).await.context("Failed to connect to Redis")?,
        )),
        None => None,
    };

    let app_state = AppState::new(
        store,
        redis,
        Arc::new(SystemClock),
        MessagingLink::new(config.messaging.base_url.clone(), config.messaging.phone.clone()),
        config.site.source.clone(),
        config.rate_limit.clone(),
        config.sessions.clone(),
    );

    // Periodic sweep of abandoned booking sessions
    let sweeper = app_state.clone();
    let sweep_every = std::time::Duration::from_secs(config.sessions.sweep_interval_seconds.max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_every);
        loop {
            interval.tick().await;
            let evicted = sweeper.evict_idle_sessions(chrono::Utc::now()).await;
            if evicted > 0 {
                tracing::info!("Evicted {} idle booking sessions", evicted);
            }
        }
    });

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>()
    ).await?;

    Ok(())
}
