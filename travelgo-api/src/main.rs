use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use travelgo_api::{app, AppState};
use travelgo_booking::SessionStore;
use travelgo_core::RecordStore;
use travelgo_store::app_config::{Config, StoreBackend};
use travelgo_store::{seed, MemoryStore, RedisStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travelgo_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    tracing::info!("Starting TravelGo API on port {}", config.server.port);

    let store: Arc<dyn RecordStore> = match config.store.backend {
        StoreBackend::Redis => Arc::new(
            RedisStore::new(&config.redis.url)
                .await
                .expect("Failed to connect to Redis"),
        ),
        StoreBackend::Memory => {
            let store = Arc::new(MemoryStore::new());
            if config.store.seed_demo_data {
                seed::seed_demo_inventory(store.as_ref())
                    .await
                    .expect("Failed to seed demo inventory");
            }
            store
        }
    };

    let sessions = Arc::new(SessionStore::new(Duration::from_secs(
        config.session.ttl_seconds,
    )));
    let state = AppState::new(store, sessions, config.admin.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app(state))
        .await
        .expect("Server error");
}
