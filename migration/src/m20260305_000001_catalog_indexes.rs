use sea_orm_migration::prelude::*;

use crate::m20260301_000001_catalog_tables::{
    CollectedResource, FriendLink, HotSearchItem, ResourceLink,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 热词按 (分类, 词) 查找
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_hot_search_items_category_term")
                    .table(HotSearchItem::Table)
                    .col(HotSearchItem::CategoryId)
                    .col(HotSearchItem::Term)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_collected_resources_created_at")
                    .table(CollectedResource::Table)
                    .col(CollectedResource::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_collected_resources_views")
                    .table(CollectedResource::Table)
                    .col(CollectedResource::Views)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_collected_resources_category")
                    .table(CollectedResource::Table)
                    .col(CollectedResource::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_resource_links_resource_id")
                    .table(ResourceLink::Table)
                    .col(ResourceLink::ResourceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_friend_links_status_sort")
                    .table(FriendLink::Table)
                    .col(FriendLink::Status)
                    .col(FriendLink::Sort)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_friend_links_status_sort")
                    .table(FriendLink::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_resource_links_resource_id")
                    .table(ResourceLink::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_collected_resources_category")
                    .table(CollectedResource::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_collected_resources_views")
                    .table(CollectedResource::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_collected_resources_created_at")
                    .table(CollectedResource::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_hot_search_items_category_term")
                    .table(HotSearchItem::Table)
                    .to_owned(),
            )
            .await
    }
}
