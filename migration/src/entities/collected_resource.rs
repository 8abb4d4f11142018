use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "collected_resources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub unique_id: String,
    pub channel: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub original_content: String,
    /// JSON 数组文本，例如 `["4K","国语"]`
    #[sea_orm(column_type = "Text")]
    pub tags: String,
    pub image_url: String,
    pub category: String,
    pub quality: String,
    pub year: Option<i32>,
    pub views: i64,
    pub status: i32,
    pub created_at: DateTimeUtc,
    /// 最近一次浏览量增长的时间，从未增长过时为空
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
