use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 分类表
        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Category::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Category::Name).string().not_null())
                    .col(
                        ColumnDef::new(Category::Alias)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Category::Icon).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Category::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Category::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 热搜词表
        manager
            .create_table(
                Table::create()
                    .table(HotSearchItem::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HotSearchItem::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(HotSearchItem::CategoryId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HotSearchItem::Term).string().not_null())
                    .col(
                        ColumnDef::new(HotSearchItem::Score)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(HotSearchItem::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HotSearchItem::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 聚合资源表
        manager
            .create_table(
                Table::create()
                    .table(CollectedResource::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CollectedResource::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CollectedResource::UniqueId)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(CollectedResource::Channel)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(CollectedResource::Title).string().not_null())
                    .col(ColumnDef::new(CollectedResource::Description).text().not_null())
                    .col(
                        ColumnDef::new(CollectedResource::OriginalContent)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CollectedResource::Tags).text().not_null())
                    .col(
                        ColumnDef::new(CollectedResource::ImageUrl)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CollectedResource::Category)
                            .string_len(64)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CollectedResource::Quality)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(CollectedResource::Year).integer().null())
                    .col(
                        ColumnDef::new(CollectedResource::Views)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CollectedResource::Status)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(CollectedResource::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollectedResource::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 资源网盘链接表
        manager
            .create_table(
                Table::create()
                    .table(ResourceLink::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResourceLink::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ResourceLink::ResourceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ResourceLink::CloudType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ResourceLink::Url).text().not_null())
                    .col(
                        ColumnDef::new(ResourceLink::Password)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ResourceLink::Note)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ResourceLink::Source)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ResourceLink::Status)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(ResourceLink::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 友情链接表
        manager
            .create_table(
                Table::create()
                    .table(FriendLink::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FriendLink::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FriendLink::Name).string().not_null())
                    .col(ColumnDef::new(FriendLink::Url).string().not_null())
                    .col(ColumnDef::new(FriendLink::Icon).string().not_null().default(""))
                    .col(
                        ColumnDef::new(FriendLink::Description)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(FriendLink::Category).string().not_null())
                    .col(
                        ColumnDef::new(FriendLink::Sort)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(FriendLink::Status)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(FriendLink::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FriendLink::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FriendLink::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ResourceLink::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CollectedResource::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HotSearchItem::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Category::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Category {
    #[sea_orm(iden = "categories")]
    Table,
    Id,
    Name,
    Alias,
    Icon,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum HotSearchItem {
    #[sea_orm(iden = "hot_search_items")]
    Table,
    Id,
    CategoryId,
    Term,
    Score,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum CollectedResource {
    #[sea_orm(iden = "collected_resources")]
    Table,
    Id,
    UniqueId,
    Channel,
    Title,
    Description,
    OriginalContent,
    Tags,
    ImageUrl,
    Category,
    Quality,
    Year,
    Views,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum ResourceLink {
    #[sea_orm(iden = "resource_links")]
    Table,
    Id,
    ResourceId,
    CloudType,
    Url,
    Password,
    Note,
    Source,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum FriendLink {
    #[sea_orm(iden = "friend_links")]
    Table,
    Id,
    Name,
    Url,
    Icon,
    Description,
    Category,
    Sort,
    Status,
    CreatedAt,
    UpdatedAt,
}
