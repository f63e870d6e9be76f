use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::Router;
use secrecy::Secret;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use dokuly_lifecycle::adapters::cache::{FileCacheStore, InMemoryCacheStore, RedisCacheStore};
use dokuly_lifecycle::adapters::memory::{
    InMemoryItemGateway, StaticReferenceData, StaticRulesEvaluator,
};
use dokuly_lifecycle::adapters::rest::{RestBackendClient, RestBackendConfig};
use dokuly_lifecycle::adapters::{lifecycle_router, InMemoryEventBus, LifecycleAppState};
use dokuly_lifecycle::application::handlers::lifecycle::{RefreshTracker, REFRESH_EVENT_TYPES};
use dokuly_lifecycle::application::reference::{ReadThroughCache, ReferenceDataService};
use dokuly_lifecycle::config::{AppConfig, BackendMode, CacheBackend, ConfigError};
use dokuly_lifecycle::domain::foundation::ItemId;
use dokuly_lifecycle::domain::item::{ItemType, Revision, VersionedItem};
use dokuly_lifecycle::domain::lifecycle::ReleaseState;
use dokuly_lifecycle::ports::{
    CacheStore, EventSubscriber, ItemGateway, ReferenceDataSource, ReferenceKind, RulesEvaluator,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    init_tracing(&config);

    let bus = Arc::new(InMemoryEventBus::new());
    let refresh = Arc::new(RefreshTracker::new());
    bus.subscribe_all(&REFRESH_EVENT_TYPES, refresh.clone());

    let (items, rules, source) = backend(&config)?;
    let cache = ReadThroughCache::new(cache_store(&config).await?);
    let reference_data = Arc::new(ReferenceDataService::new(source, cache));

    if config.cache.warm_on_start {
        for (kind, error) in reference_data.warm(&ReferenceKind::ALL).await {
            tracing::warn!(kind = %kind, error = %error, "Reference list not warmed");
        }
    }

    let state = LifecycleAppState::new(
        items,
        rules,
        bus,
        reference_data,
        refresh,
        config.organization.revision_scheme,
    );
    let app = router(&config, state)?;

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, mode = ?config.backend.mode, "Starting dokuly-lifecycle");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

type Backend = (
    Arc<dyn ItemGateway>,
    Arc<dyn RulesEvaluator>,
    Arc<dyn ReferenceDataSource>,
);

fn backend(config: &AppConfig) -> Result<Backend, BoxError> {
    match config.backend.mode {
        BackendMode::Rest => {
            let client = Arc::new(RestBackendClient::new(RestBackendConfig {
                base_url: config.backend.base_url.clone(),
                api_token: config
                    .backend
                    .api_token
                    .clone()
                    .unwrap_or_else(|| Secret::new(String::new())),
                timeout: config.backend.timeout(),
            })?);
            let items: Arc<dyn ItemGateway> = client.clone();
            let rules: Arc<dyn RulesEvaluator> = client.clone();
            let source: Arc<dyn ReferenceDataSource> = client;
            Ok((items, rules, source))
        }
        BackendMode::Memory => {
            tracing::warn!("Using the in-memory backend; changes are not persisted");
            let items: Arc<dyn ItemGateway> =
                Arc::new(InMemoryItemGateway::with_items(demo_items()));
            let rules: Arc<dyn RulesEvaluator> = Arc::new(StaticRulesEvaluator::passing());
            let source: Arc<dyn ReferenceDataSource> = Arc::new(StaticReferenceData::new());
            Ok((items, rules, source))
        }
    }
}

async fn cache_store(config: &AppConfig) -> Result<Arc<dyn CacheStore>, BoxError> {
    let store: Arc<dyn CacheStore> = match config.cache.backend {
        CacheBackend::Memory => Arc::new(InMemoryCacheStore::with_ttl(config.cache.ttl())),
        CacheBackend::File => {
            Arc::new(FileCacheStore::new(&config.cache.dir).with_ttl(config.cache.ttl()))
        }
        CacheBackend::Redis => {
            let redis = config
                .redis
                .as_ref()
                .ok_or("cache backend is redis but no redis section is configured")?;
            let client = redis::Client::open(redis.url.as_str())?;
            let conn =
                tokio::time::timeout(redis.connect_timeout(), client.get_multiplexed_tokio_connection())
                    .await??;
            Arc::new(RedisCacheStore::new(
                conn,
                config.cache.key_prefix.clone(),
                config.cache.ttl_secs,
            ))
        }
    };
    Ok(store)
}

fn router(config: &AppConfig, state: LifecycleAppState) -> Result<Router, BoxError> {
    let origins = config
        .server
        .cors_origins_list()
        .iter()
        .map(|o| o.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Ok(lifecycle_router()
        .with_state(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

fn demo_items() -> Vec<VersionedItem> {
    let item = |id: i64, item_type: ItemType, number: &str, name: &str, state: ReleaseState| {
        VersionedItem {
            id: ItemId::new(id),
            item_type,
            full_number: number.to_string(),
            display_name: name.to_string(),
            release_state: state,
            is_approved_for_release: false,
            is_latest_revision: true,
            revision: Revision::new("A"),
            quality_assurance: None,
            project_id: None,
            is_archived: false,
        }
    };
    vec![
        item(1, ItemType::Part, "PRT1001A", "M3 standoff", ReleaseState::Released),
        item(2, ItemType::Assembly, "ASM1002A", "Sensor housing", ReleaseState::Review),
        item(3, ItemType::Pcba, "PCBA1003A", "Controller board", ReleaseState::Draft),
        item(4, ItemType::Document, "DOC1004A", "Test procedure", ReleaseState::Draft),
    ]
}
