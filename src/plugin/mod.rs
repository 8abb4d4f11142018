//! Catalog plugin registry
//!
//! Plugins are registered explicitly at startup. Initialization runs exactly
//! once per registry behind a `OnceCell` gate; searches fan out to every
//! plugin and merge the results.

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::errors::{CatalogError, Result};
use crate::storage::SearchResult;

mod soula;

pub use soula::SoulaPlugin;

/// 目录插件
#[async_trait]
pub trait CatalogPlugin: Send + Sync {
    fn name(&self) -> &str;

    /// 启动时调用一次
    async fn initialize(&self) -> Result<()>;

    async fn search(&self, keyword: &str) -> Result<Vec<SearchResult>>;

    /// 挂载插件自己的 HTTP 路由
    fn register_routes(&self, _cfg: &mut web::ServiceConfig) {}
}

#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn CatalogPlugin>>,
    initialized: OnceCell<()>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册插件，同名插件只保留第一个
    pub fn register(&mut self, plugin: Arc<dyn CatalogPlugin>) {
        if self.plugins.iter().any(|p| p.name() == plugin.name()) {
            warn!("Plugin '{}' already registered, skipping", plugin.name());
            return;
        }
        debug!("Registering catalog plugin: {}", plugin.name());
        self.plugins.push(plugin);
    }

    /// 初始化所有插件，重复调用不会再次执行
    ///
    /// 任一插件初始化失败时返回错误，下次调用会重新尝试。
    pub async fn initialize_all(&self) -> Result<()> {
        self.initialized
            .get_or_try_init(|| async {
                for plugin in &self.plugins {
                    plugin.initialize().await.map_err(|e| {
                        CatalogError::plugin_init(format!(
                            "Plugin '{}' failed to initialize: {}",
                            plugin.name(),
                            e
                        ))
                    })?;
                    info!("Plugin '{}' initialized", plugin.name());
                }
                Ok::<(), CatalogError>(())
            })
            .await?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.initialized()
    }

    /// 调用所有插件搜索并合并结果，单个插件失败只记日志
    pub async fn search_all(&self, keyword: &str) -> Vec<SearchResult> {
        let mut merged = Vec::new();
        for plugin in &self.plugins {
            match plugin.search(keyword).await {
                Ok(results) => {
                    debug!(
                        "Plugin '{}' returned {} results for '{}'",
                        plugin.name(),
                        results.len(),
                        keyword
                    );
                    merged.extend(results);
                }
                Err(e) => warn!("Plugin '{}' search failed: {}", plugin.name(), e),
            }
        }
        merged
    }

    /// 挂载所有插件路由
    pub fn configure_routes(&self, cfg: &mut web::ServiceConfig) {
        for plugin in &self.plugins {
            plugin.register_routes(cfg);
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.plugins.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
