use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::catalog::HotTermTracker;
use crate::config::StaticConfig;
use crate::plugin::{PluginRegistry, SoulaPlugin};
use crate::storage::{CatalogRepository, SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub tracker: Arc<HotTermTracker>,
    pub registry: Arc<PluginRegistry>,
}

/// 组装插件注册表
///
/// 必须在 tokio runtime 内调用（tracker 会启动后台 worker）。
pub fn build_registry(
    repo: Arc<dyn CatalogRepository>,
    config: &StaticConfig,
) -> (PluginRegistry, Arc<HotTermTracker>) {
    let tracker = HotTermTracker::spawn(repo.clone(), config.catalog.hot_term_queue_capacity);

    let mut registry = PluginRegistry::new();
    registry.register(Arc::new(SoulaPlugin::new(repo, tracker.clone(), config)));

    (registry, tracker)
}

/// 准备服务器启动的上下文
/// 包括存储、热词队列和插件注册表
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(config)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let repo: Arc<dyn CatalogRepository> = storage.clone();
    let (registry, tracker) = build_registry(repo, config);

    registry
        .initialize_all()
        .await
        .context("Failed to initialize catalog plugins")?;
    info!(
        "Catalog plugins ready: {:?} (token gate {})",
        registry.names(),
        if config.api.token.is_empty() {
            "disabled"
        } else {
            "enabled"
        }
    );

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        tracker,
        registry: Arc::new(registry),
    })
}
