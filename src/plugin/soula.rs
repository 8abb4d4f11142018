//! The catalog plugin: keyword search over collected resources plus the
//! token-gated browsing and friend-link endpoints.

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use tracing::info;

use crate::api::services::catalog::catalog_routes;
use crate::catalog::HotTermTracker;
use crate::config::StaticConfig;
use crate::errors::Result;
use crate::services::{CatalogService, FriendLinkService};
use crate::storage::seed::seed_defaults;
use crate::storage::{CatalogRepository, SearchResult};

use super::CatalogPlugin;

pub struct SoulaPlugin {
    repo: Arc<dyn CatalogRepository>,
    catalog: Arc<CatalogService>,
    friend_links: Arc<FriendLinkService>,
    tracker: Arc<HotTermTracker>,
    token: String,
    seed_on_startup: bool,
}

impl SoulaPlugin {
    pub const NAME: &'static str = "soula";

    pub fn new(
        repo: Arc<dyn CatalogRepository>,
        tracker: Arc<HotTermTracker>,
        config: &StaticConfig,
    ) -> Self {
        let catalog = CatalogService::new(repo.clone())
            .with_search_limit(config.catalog.search_limit);
        let friend_links = FriendLinkService::new(repo.clone())
            .with_display_limit(config.catalog.friend_link_display_limit);

        Self {
            repo,
            catalog: Arc::new(catalog),
            friend_links: Arc::new(friend_links),
            tracker,
            token: config.api.token.clone(),
            seed_on_startup: config.catalog.seed_on_startup,
        }
    }
}

#[async_trait]
impl CatalogPlugin for SoulaPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn initialize(&self) -> Result<()> {
        if !self.seed_on_startup {
            info!("Seeding disabled, skipping bootstrap data");
            return Ok(());
        }
        seed_defaults(self.repo.as_ref()).await;
        Ok(())
    }

    /// 搜索完成后把结果交给热词队列，不等待其处理
    async fn search(&self, keyword: &str) -> Result<Vec<SearchResult>> {
        let results = self.catalog.search(keyword).await?;
        self.tracker.submit(keyword, &results);
        Ok(results)
    }

    fn register_routes(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.catalog.clone()))
            .app_data(web::Data::new(self.friend_links.clone()))
            .service(catalog_routes(&self.token));
    }
}
