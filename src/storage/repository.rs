//! Repository abstraction
//!
//! Core components depend only on these traits, never on the SeaORM backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::catalog::pagination::PageRequest;
use crate::errors::Result;
use crate::storage::models::{
    ALL_CATEGORY_ALIAS, Category, CategorySeed, FriendLink, FriendLinkDraft, HotSearchItem,
    Resource, ResourceLink, ResourceRecord, UpsertOutcome,
};

/// 资源过滤条件
///
/// category 为空或为 "all" 时不过滤；keyword 对标题、描述、原文做子串匹配。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    pub category: Option<String>,
    pub keyword: Option<String>,
    pub created_since: Option<DateTime<Utc>>,
}

impl ResourceFilter {
    pub fn with_category(mut self, category: Option<&str>) -> Self {
        self.category = category
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORY_ALIAS)
            .map(str::to_string);
        self
    }

    pub fn with_keyword(mut self, keyword: Option<&str>) -> Self {
        self.keyword = keyword
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        self
    }

    pub fn created_since(mut self, since: DateTime<Utc>) -> Self {
        self.created_since = Some(since);
        self
    }
}

/// 资源排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceOrder {
    /// 按创建时间倒序
    #[default]
    Latest,
    /// 按浏览量倒序
    Views,
}

impl ResourceOrder {
    /// 查询参数 `sort=hot` 表示热门，其余都按最新
    pub fn from_param(sort: Option<&str>) -> Self {
        match sort.map(str::trim) {
            Some("hot") => ResourceOrder::Views,
            _ => ResourceOrder::Latest,
        }
    }
}

/// 只读查询
#[async_trait]
pub trait CatalogReader: Send + Sync {
    async fn count_categories(&self) -> Result<u64>;

    /// 按 id 升序分页
    async fn list_categories(&self, page: PageRequest) -> Result<Vec<Category>>;

    async fn find_category_by_alias(&self, alias: &str) -> Result<Option<Category>>;

    /// 按 score 倒序取前 `limit` 个
    async fn top_hot_terms(&self, category_id: i64, limit: u64) -> Result<Vec<HotSearchItem>>;

    async fn find_hot_term(&self, category_id: i64, term: &str) -> Result<Option<HotSearchItem>>;

    async fn count_resources(&self, filter: &ResourceFilter) -> Result<u64>;

    async fn list_resources(
        &self,
        filter: &ResourceFilter,
        order: ResourceOrder,
        page: PageRequest,
    ) -> Result<Vec<Resource>>;

    /// 随机顺序取样
    async fn sample_resources(
        &self,
        created_since: Option<DateTime<Utc>>,
        limit: u64,
    ) -> Result<Vec<Resource>>;

    /// 按 unique_id 取资源及其全部链接（链接按 id 升序）
    async fn find_resource(&self, unique_id: &str)
    -> Result<Option<(Resource, Vec<ResourceLink>)>>;

    /// 友链按 (sort asc, id asc) 排序
    async fn list_friend_links(&self, only_enabled: bool) -> Result<Vec<FriendLink>>;

    async fn find_friend_link(&self, id: i64) -> Result<Option<FriendLink>>;
}

/// 写操作
#[async_trait]
pub trait CatalogWriter: Send + Sync {
    /// 按 alias upsert，名称和图标每次都会刷新
    async fn upsert_category(&self, seed: &CategorySeed) -> Result<Category>;

    async fn create_hot_term(&self, category_id: i64, term: &str) -> Result<HotSearchItem>;

    /// score = score + 1
    async fn increment_hot_term(&self, id: i64) -> Result<()>;

    /// views = views + increment, updated_at = at（单条 UPDATE）
    async fn bump_views(&self, resource_id: i64, increment: i64, at: DateTime<Utc>) -> Result<()>;

    /// 按 unique_id upsert 资源，并整体替换其链接
    async fn upsert_resource(&self, record: &ResourceRecord) -> Result<(Resource, UpsertOutcome)>;

    async fn create_friend_link(&self, draft: &FriendLinkDraft) -> Result<FriendLink>;

    /// id 不存在时返回 NotFound
    async fn update_friend_link(&self, id: i64, draft: &FriendLinkDraft) -> Result<FriendLink>;

    /// 仅当友链表为空时写入，返回写入条数
    async fn seed_friend_links(&self, seeds: &[FriendLinkDraft]) -> Result<usize>;
}

/// 完整仓储接口
pub trait CatalogRepository: CatalogReader + CatalogWriter {}

impl<T: CatalogReader + CatalogWriter + ?Sized> CatalogRepository for T {}
