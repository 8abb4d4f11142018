//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, ExprTrait, PaginatorTrait,
    QueryFilter, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use tracing::{debug, info};

use super::converters::{
    draft_to_active_model, link_record_to_active_model, model_to_category,
    model_to_friend_link, model_to_hot_term, model_to_resource, record_to_active_model,
};
use super::{SeaOrmStorage, retry};
use crate::errors::{CatalogError, Result};
use crate::storage::models::{
    Category, CategorySeed, FriendLink, FriendLinkDraft, HotSearchItem, Resource, ResourceRecord,
    UpsertOutcome,
};
use crate::storage::repository::CatalogWriter;

use migration::entities::{
    category, collected_resource, friend_link, hot_search_item, resource_link,
};

fn write_error(what: &str, e: sea_orm::DbErr) -> CatalogError {
    CatalogError::database_operation(format!("{}: {}", what, e))
}

#[async_trait]
impl CatalogWriter for SeaOrmStorage {
    async fn upsert_category(&self, seed: &CategorySeed) -> Result<Category> {
        let db = &self.db;
        let now = Utc::now();

        retry::with_retry(
            &format!("upsert_category({})", seed.alias),
            self.retry_config,
            || async {
                let active = category::ActiveModel {
                    name: Set(seed.name.clone()),
                    alias: Set(seed.alias.clone()),
                    icon: Set(seed.icon.clone()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                category::Entity::insert(active)
                    .on_conflict(
                        OnConflict::column(category::Column::Alias)
                            .update_columns([
                                category::Column::Name,
                                category::Column::Icon,
                                category::Column::UpdatedAt,
                            ])
                            .to_owned(),
                    )
                    .exec(db)
                    .await
            },
        )
        .await
        .map_err(|e| write_error("写入分类失败", e))?;

        let model = category::Entity::find()
            .filter(category::Column::Alias.eq(seed.alias.as_str()))
            .one(db)
            .await
            .map_err(|e| write_error("查询分类失败", e))?
            .ok_or_else(|| {
                CatalogError::database_operation(format!("分类 '{}' 写入后不存在", seed.alias))
            })?;

        Ok(model_to_category(model))
    }

    async fn create_hot_term(&self, category_id: i64, term: &str) -> Result<HotSearchItem> {
        let now = Utc::now();
        let active = hot_search_item::ActiveModel {
            category_id: Set(category_id),
            term: Set(term.to_string()),
            score: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建热搜词失败", e))?;

        debug!("Hot term created: '{}' (category {})", term, category_id);
        Ok(model_to_hot_term(model))
    }

    async fn increment_hot_term(&self, id: i64) -> Result<()> {
        let db = &self.db;
        let now = Utc::now();

        retry::with_retry("increment_hot_term", self.retry_config, || async {
            hot_search_item::Entity::update_many()
                .col_expr(
                    hot_search_item::Column::Score,
                    Expr::col(hot_search_item::Column::Score).add(1),
                )
                .col_expr(hot_search_item::Column::UpdatedAt, Expr::value(now))
                .filter(hot_search_item::Column::Id.eq(id))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| write_error("更新热搜词失败", e))?;

        Ok(())
    }

    async fn bump_views(&self, resource_id: i64, increment: i64, at: DateTime<Utc>) -> Result<()> {
        let db = &self.db;

        // 单条 UPDATE，依赖数据库自身的原子累加
        retry::with_retry("bump_views", self.retry_config, || async {
            collected_resource::Entity::update_many()
                .col_expr(
                    collected_resource::Column::Views,
                    Expr::col(collected_resource::Column::Views).add(increment),
                )
                .col_expr(collected_resource::Column::UpdatedAt, Expr::value(at))
                .filter(collected_resource::Column::Id.eq(resource_id))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| write_error("更新浏览量失败", e))?;

        Ok(())
    }

    async fn upsert_resource(&self, record: &ResourceRecord) -> Result<(Resource, UpsertOutcome)> {
        if record.unique_id.trim().is_empty() {
            return Err(CatalogError::validation("unique_id 不能为空"));
        }

        let now = Utc::now();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| write_error("开始事务失败", e))?;

        let existing = collected_resource::Entity::find()
            .filter(collected_resource::Column::UniqueId.eq(record.unique_id.as_str()))
            .one(&txn)
            .await
            .map_err(|e| write_error("查询资源失败", e))?;

        let active = record_to_active_model(record, existing.as_ref().map(|m| m.id), now);
        let (model, outcome) = if existing.is_some() {
            let model = active
                .update(&txn)
                .await
                .map_err(|e| write_error("更新资源失败", e))?;
            (model, UpsertOutcome::Updated)
        } else {
            let model = active
                .insert(&txn)
                .await
                .map_err(|e| write_error("创建资源失败", e))?;
            (model, UpsertOutcome::Created)
        };

        // 链接整体替换
        resource_link::Entity::delete_many()
            .filter(resource_link::Column::ResourceId.eq(model.id))
            .exec(&txn)
            .await
            .map_err(|e| write_error("清理资源链接失败", e))?;

        if !record.links.is_empty() {
            let links: Vec<resource_link::ActiveModel> = record
                .links
                .iter()
                .map(|link| link_record_to_active_model(model.id, link, now))
                .collect();
            resource_link::Entity::insert_many(links)
                .exec(&txn)
                .await
                .map_err(|e| write_error("写入资源链接失败", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| write_error("提交事务失败", e))?;

        debug!(
            "Resource {} {:?} with {} links",
            record.unique_id,
            outcome,
            record.links.len()
        );
        Ok((model_to_resource(model), outcome))
    }

    async fn create_friend_link(&self, draft: &FriendLinkDraft) -> Result<FriendLink> {
        let model = draft_to_active_model(draft, None, Utc::now())
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建友链失败", e))?;

        self.invalidate_friend_link_cache();
        info!("Friend link created: {} ({})", model.name, model.url);
        Ok(model_to_friend_link(model))
    }

    async fn update_friend_link(&self, id: i64, draft: &FriendLinkDraft) -> Result<FriendLink> {
        let existing = friend_link::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| write_error("查询友链失败", e))?;
        if existing.is_none() {
            return Err(CatalogError::not_found(format!("友链不存在: {}", id)));
        }

        let model = draft_to_active_model(draft, Some(id), Utc::now())
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新友链失败", e))?;

        self.invalidate_friend_link_cache();
        info!("Friend link updated: {} ({})", model.id, model.url);
        Ok(model_to_friend_link(model))
    }

    async fn seed_friend_links(&self, seeds: &[FriendLinkDraft]) -> Result<usize> {
        if seeds.is_empty() {
            return Ok(0);
        }

        let count = friend_link::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| write_error("统计友链失败", e))?;
        if count > 0 {
            return Ok(0);
        }

        let now = Utc::now();
        let models: Vec<friend_link::ActiveModel> = seeds
            .iter()
            .map(|draft| draft_to_active_model(draft, None, now))
            .collect();
        friend_link::Entity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(|e| write_error("写入默认友链失败", e))?;

        self.invalidate_friend_link_cache();
        Ok(seeds.len())
    }
}
