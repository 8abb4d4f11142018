use std::sync::Arc;
use std::time::Duration;

use crate::config::StaticConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;
pub mod repository;
pub mod seed;

pub use backend::SeaOrmStorage;
pub use models::{
    Category, CategorySeed, CloudType, FriendLink, FriendLinkDraft, HotSearchItem, Resource,
    ResourceLink, ResourceRecord, SearchResult, Tags,
};
pub use repository::{
    CatalogReader, CatalogRepository, CatalogWriter, ResourceFilter, ResourceOrder,
};

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &StaticConfig) -> Result<Arc<SeaOrmStorage>> {
        let database_url = &config.database.database_url;

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage = backend::SeaOrmStorage::new(database_url, &backend_type, &config.database)
            .await?
            .with_friend_link_cache_ttl(Duration::from_secs(
                config.catalog.friend_link_cache_ttl_secs,
            ));
        Ok(Arc::new(storage))
    }
}
