//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, Condition, DbBackend, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, sea_query::Expr,
};
use tracing::debug;

use super::converters::{
    model_to_category, model_to_friend_link, model_to_hot_term, model_to_resource,
    model_to_resource_link,
};
use super::{SeaOrmStorage, retry};
use crate::catalog::pagination::PageRequest;
use crate::errors::{CatalogError, Result};
use crate::storage::models::{
    Category, FRIEND_LINK_ENABLED, FriendLink, HotSearchItem, Resource, ResourceLink,
};
use crate::storage::repository::{CatalogReader, ResourceFilter, ResourceOrder};

use migration::entities::{
    category, collected_resource, friend_link, hot_search_item, resource_link,
};

/// 根据过滤条件构建 WHERE
fn resource_condition(filter: &ResourceFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(ref category) = filter.category {
        condition = condition.add(collected_resource::Column::Category.eq(category.as_str()));
    }

    // 关键词：标题、描述、原文任一包含
    if let Some(ref keyword) = filter.keyword {
        condition = condition.add(
            Condition::any()
                .add(collected_resource::Column::Title.contains(keyword.as_str()))
                .add(collected_resource::Column::Description.contains(keyword.as_str()))
                .add(collected_resource::Column::OriginalContent.contains(keyword.as_str())),
        );
    }

    if let Some(since) = filter.created_since {
        condition = condition.add(collected_resource::Column::CreatedAt.gte(since));
    }

    condition
}

fn random_order_expr(backend: DbBackend) -> &'static str {
    match backend {
        DbBackend::MySql => "RAND()",
        _ => "RANDOM()",
    }
}

fn query_error(what: &str, e: sea_orm::DbErr) -> CatalogError {
    CatalogError::database_operation(format!("{}: {}", what, e))
}

#[async_trait]
impl CatalogReader for SeaOrmStorage {
    async fn count_categories(&self) -> Result<u64> {
        let db = &self.db;
        retry::with_retry("count_categories", self.retry_config, || async {
            category::Entity::find().count(db).await
        })
        .await
        .map_err(|e| query_error("统计分类失败", e))
    }

    async fn list_categories(&self, page: PageRequest) -> Result<Vec<Category>> {
        let db = &self.db;
        let models = retry::with_retry("list_categories", self.retry_config, || async {
            category::Entity::find()
                .order_by_asc(category::Column::Id)
                .offset(page.offset())
                .limit(page.page_size)
                .all(db)
                .await
        })
        .await
        .map_err(|e| query_error("查询分类失败", e))?;

        Ok(models.into_iter().map(model_to_category).collect())
    }

    async fn find_category_by_alias(&self, alias: &str) -> Result<Option<Category>> {
        let db = &self.db;
        let model = retry::with_retry(
            &format!("find_category_by_alias({})", alias),
            self.retry_config,
            || async {
                category::Entity::find()
                    .filter(category::Column::Alias.eq(alias))
                    .one(db)
                    .await
            },
        )
        .await
        .map_err(|e| query_error("查询分类失败", e))?;

        Ok(model.map(model_to_category))
    }

    async fn top_hot_terms(&self, category_id: i64, limit: u64) -> Result<Vec<HotSearchItem>> {
        let db = &self.db;
        let models = retry::with_retry("top_hot_terms", self.retry_config, || async {
            hot_search_item::Entity::find()
                .filter(hot_search_item::Column::CategoryId.eq(category_id))
                .order_by_desc(hot_search_item::Column::Score)
                .order_by_asc(hot_search_item::Column::Id)
                .limit(limit)
                .all(db)
                .await
        })
        .await
        .map_err(|e| query_error("查询热搜词失败", e))?;

        Ok(models.into_iter().map(model_to_hot_term).collect())
    }

    async fn find_hot_term(&self, category_id: i64, term: &str) -> Result<Option<HotSearchItem>> {
        let db = &self.db;
        let model = retry::with_retry("find_hot_term", self.retry_config, || async {
            hot_search_item::Entity::find()
                .filter(hot_search_item::Column::CategoryId.eq(category_id))
                .filter(hot_search_item::Column::Term.eq(term))
                .order_by_asc(hot_search_item::Column::Id)
                .one(db)
                .await
        })
        .await
        .map_err(|e| query_error("查询热搜词失败", e))?;

        Ok(model.map(model_to_hot_term))
    }

    async fn count_resources(&self, filter: &ResourceFilter) -> Result<u64> {
        let db = &self.db;
        retry::with_retry("count_resources", self.retry_config, || async {
            collected_resource::Entity::find()
                .filter(resource_condition(filter))
                .count(db)
                .await
        })
        .await
        .map_err(|e| query_error("统计资源失败", e))
    }

    async fn list_resources(
        &self,
        filter: &ResourceFilter,
        order: ResourceOrder,
        page: PageRequest,
    ) -> Result<Vec<Resource>> {
        let db = &self.db;
        let models = retry::with_retry("list_resources", self.retry_config, || async {
            let query = collected_resource::Entity::find().filter(resource_condition(filter));
            let query = match order {
                ResourceOrder::Views => query.order_by_desc(collected_resource::Column::Views),
                ResourceOrder::Latest => {
                    query.order_by_desc(collected_resource::Column::CreatedAt)
                }
            };
            query
                .order_by_desc(collected_resource::Column::Id)
                .offset(page.offset())
                .limit(page.page_size)
                .all(db)
                .await
        })
        .await
        .map_err(|e| query_error("查询资源失败", e))?;

        debug!(
            "list_resources returned {} rows (page {}, size {})",
            models.len(),
            page.page,
            page.page_size
        );
        Ok(models.into_iter().map(model_to_resource).collect())
    }

    async fn sample_resources(
        &self,
        created_since: Option<DateTime<Utc>>,
        limit: u64,
    ) -> Result<Vec<Resource>> {
        let db = &self.db;
        let random = random_order_expr(self.db_backend());
        let models = retry::with_retry("sample_resources", self.retry_config, || async {
            let mut query = collected_resource::Entity::find();
            if let Some(since) = created_since {
                query = query.filter(collected_resource::Column::CreatedAt.gte(since));
            }
            query
                .order_by_asc(Expr::cust(random))
                .limit(limit)
                .all(db)
                .await
        })
        .await
        .map_err(|e| query_error("随机查询资源失败", e))?;

        Ok(models.into_iter().map(model_to_resource).collect())
    }

    async fn find_resource(
        &self,
        unique_id: &str,
    ) -> Result<Option<(Resource, Vec<ResourceLink>)>> {
        let db = &self.db;
        let model = retry::with_retry(
            &format!("find_resource({})", unique_id),
            self.retry_config,
            || async {
                collected_resource::Entity::find()
                    .filter(collected_resource::Column::UniqueId.eq(unique_id))
                    .one(db)
                    .await
            },
        )
        .await
        .map_err(|e| query_error("查询资源失败", e))?;

        let Some(model) = model else {
            return Ok(None);
        };

        let resource_id = model.id;
        let links = retry::with_retry("find_resource_links", self.retry_config, || async {
            resource_link::Entity::find()
                .filter(resource_link::Column::ResourceId.eq(resource_id))
                .order_by_asc(resource_link::Column::Id)
                .all(db)
                .await
        })
        .await
        .map_err(|e| query_error("查询资源链接失败", e))?;

        Ok(Some((
            model_to_resource(model),
            links.into_iter().map(model_to_resource_link).collect(),
        )))
    }

    async fn list_friend_links(&self, only_enabled: bool) -> Result<Vec<FriendLink>> {
        if only_enabled && let Some(cached) = self.friend_link_cache.get(&()) {
            return Ok(cached.as_ref().clone());
        }

        let db = &self.db;
        let models = retry::with_retry("list_friend_links", self.retry_config, || async {
            let mut query = friend_link::Entity::find();
            if only_enabled {
                query = query.filter(friend_link::Column::Status.eq(FRIEND_LINK_ENABLED));
            }
            query
                .order_by_asc(friend_link::Column::Sort)
                .order_by_asc(friend_link::Column::Id)
                .all(db)
                .await
        })
        .await
        .map_err(|e| query_error("查询友链失败", e))?;

        let links: Vec<FriendLink> = models.into_iter().map(model_to_friend_link).collect();
        if only_enabled {
            self.friend_link_cache.insert((), Arc::new(links.clone()));
        }
        Ok(links)
    }

    async fn find_friend_link(&self, id: i64) -> Result<Option<FriendLink>> {
        let db = &self.db;
        let model = retry::with_retry("find_friend_link", self.retry_config, || async {
            friend_link::Entity::find_by_id(id).one(db).await
        })
        .await
        .map_err(|e| query_error("查询友链失败", e))?;

        Ok(model.map(model_to_friend_link))
    }
}
