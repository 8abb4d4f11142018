//! SeaORM storage backend
//!
//! This module provides the catalog repository on top of SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use sea_orm::{DatabaseConnection, DbBackend};
use tracing::warn;

use crate::config::DatabaseConfig;
use crate::errors::{CatalogError, Result};
use crate::storage::models::FriendLink;

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{
    model_to_category, model_to_friend_link, model_to_hot_term, model_to_resource,
    model_to_resource_link,
};

/// 友链缓存默认 TTL
const DEFAULT_FRIEND_LINK_CACHE_TTL: Duration = Duration::from_secs(60);

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(CatalogError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based catalog storage
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    /// 已启用友链列表缓存，写入时整体失效
    friend_link_cache: Cache<(), Arc<Vec<FriendLink>>>,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str, config: &DatabaseConfig) -> Result<Self> {
        if database_url.is_empty() {
            return Err(CatalogError::database_config("DATABASE_URL 未设置"));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name, config).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            friend_link_cache: Self::build_friend_link_cache(DEFAULT_FRIEND_LINK_CACHE_TTL),
            retry_config: retry::RetryConfig::from(config),
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    /// 调整友链缓存 TTL（0 表示不缓存）
    pub fn with_friend_link_cache_ttl(mut self, ttl: Duration) -> Self {
        self.friend_link_cache = Self::build_friend_link_cache(ttl);
        self
    }

    fn build_friend_link_cache(ttl: Duration) -> Cache<(), Arc<Vec<FriendLink>>> {
        Cache::builder()
            .time_to_live(ttl)
            .max_capacity(if ttl.is_zero() { 0 } else { 1 })
            .build()
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    pub(crate) fn db_backend(&self) -> DbBackend {
        match self.backend_name.as_str() {
            "sqlite" => DbBackend::Sqlite,
            "mysql" => DbBackend::MySql,
            _ => DbBackend::Postgres,
        }
    }

    /// 清除友链缓存（数据变更时调用）
    pub fn invalidate_friend_link_cache(&self) {
        self.friend_link_cache.invalidate_all();
    }
}
