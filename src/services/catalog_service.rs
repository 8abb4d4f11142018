//! Catalog query service
//!
//! Composes repository reads into the catalog endpoints with consistent
//! pagination and "updated today" counting. Read paths degrade to empty
//! payloads on repository errors except where the result is structurally
//! required (category count and listing, single-resource detail).

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::catalog::pagination::{PageRequest, TodayWindow, total_pages};
use crate::catalog::view_growth;
use crate::errors::{CatalogError, Result};
use crate::storage::models::{ALL_CATEGORY_ALIAS, SearchResult};
use crate::storage::{
    CatalogRepository, Category, HotSearchItem, Resource, ResourceFilter, ResourceLink,
    ResourceOrder,
};

/// 分类列表默认每页条数
pub const DEFAULT_CATEGORY_PAGE_SIZE: u64 = 100;
/// 每个分类默认展示的热词数
pub const DEFAULT_HOT_TERM_LIMIT: u64 = 24;
/// 资源列表默认每页条数
pub const DEFAULT_RESOURCE_PAGE_SIZE: u64 = 10;
/// 随机资源默认条数
pub const DEFAULT_RANDOM_SAMPLE_SIZE: u64 = 6;
/// 热门资源默认条数
pub const DEFAULT_HOT_RESOURCE_LIMIT: u64 = 10;
/// 搜索结果默认上限
pub const DEFAULT_SEARCH_LIMIT: u64 = 50;

// ============ Request/Response DTOs ============

#[derive(Debug, Clone, Default)]
pub struct CategoryQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    /// 每个分类的热词条数
    pub limit: Option<i64>,
    pub keyword: Option<String>,
    /// Unix 秒，必填且不为 0
    pub today_start: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct CategoryOverview {
    pub category: Category,
    pub hot_terms: Vec<HotSearchItem>,
    pub today_count: u64,
}

#[derive(Debug, Clone)]
pub struct CategoryPage {
    pub categories: Vec<CategoryOverview>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ResourceQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub category: Option<String>,
    pub keyword: Option<String>,
    pub sort: Option<String>,
    /// Unix 秒，必填且不为 0
    pub today_start: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct ResourcePage {
    pub items: Vec<Resource>,
    pub total: u64,
    pub today_total: u64,
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
}

#[derive(Debug, Clone)]
pub struct ResourceDetail {
    pub resource: Resource,
    /// cloud_type → 链接（保持入库顺序）
    pub links_by_type: BTreeMap<String, Vec<ResourceLink>>,
    pub total_links: usize,
}

/// 把链接按网盘类型分组，组内保持原顺序
pub fn group_links_by_type(links: Vec<ResourceLink>) -> BTreeMap<String, Vec<ResourceLink>> {
    let mut grouped: BTreeMap<String, Vec<ResourceLink>> = BTreeMap::new();
    for link in links {
        grouped.entry(link.cloud_type.clone()).or_default().push(link);
    }
    grouped
}

fn positive_or(value: Option<i64>, default: u64) -> u64 {
    value.filter(|v| *v >= 1).map(|v| v as u64).unwrap_or(default)
}

// ============ Service ============

pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
    search_limit: u64,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self {
            repo,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_search_limit(mut self, limit: u64) -> Self {
        self.search_limit = limit.max(1);
        self
    }

    /// 分类 + 热词 + 今日数量
    pub async fn categories_with_hot_terms(&self, query: CategoryQuery) -> Result<CategoryPage> {
        let window = TodayWindow::from_unix(query.today_start)?;
        let page = PageRequest::new(query.page, query.page_size, DEFAULT_CATEGORY_PAGE_SIZE);
        let item_limit = PageRequest::first(positive_or(query.limit, DEFAULT_HOT_TERM_LIMIT)).page_size;
        let keyword = query
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty());

        let total = self.repo.count_categories().await?;
        let categories = self.repo.list_categories(page).await?;

        let mut overviews = Vec::with_capacity(categories.len());
        for category in categories {
            let hot_terms = match self.repo.top_hot_terms(category.id, item_limit).await {
                Ok(items) => items,
                Err(e) => {
                    warn!("Failed to load hot terms for '{}': {}", category.alias, e);
                    Vec::new()
                }
            };

            let scope = (category.alias != ALL_CATEGORY_ALIAS).then_some(category.alias.as_str());
            let filter = match keyword {
                Some(kw) => ResourceFilter::default()
                    .with_category(scope)
                    .with_keyword(Some(kw)),
                None => ResourceFilter::default()
                    .with_category(scope)
                    .created_since(window.start),
            };
            let today_count = match self.repo.count_resources(&filter).await {
                Ok(count) => count,
                Err(e) => {
                    warn!("Failed to count resources for '{}': {}", category.alias, e);
                    0
                }
            };

            overviews.push(CategoryOverview {
                category,
                hot_terms,
                today_count,
            });
        }

        Ok(CategoryPage {
            categories: overviews,
            total,
            page: page.page,
            page_size: page.page_size,
            total_pages: total_pages(total, page.page_size),
        })
    }

    /// 资源分页列表
    pub async fn list_resources(&self, query: ResourceQuery) -> Result<ResourcePage> {
        let window = TodayWindow::from_unix(query.today_start)?;
        let page = PageRequest::new(query.page, query.per_page, DEFAULT_RESOURCE_PAGE_SIZE);
        let order = ResourceOrder::from_param(query.sort.as_deref());
        let filter = ResourceFilter::default()
            .with_category(query.category.as_deref())
            .with_keyword(query.keyword.as_deref());

        let total = self.repo.count_resources(&filter).await.unwrap_or_else(|e| {
            warn!("Failed to count resources: {}", e);
            0
        });

        let items = self
            .repo
            .list_resources(&filter, order, page)
            .await
            .unwrap_or_else(|e| {
                warn!("Failed to list resources: {}", e);
                Vec::new()
            });

        // 今日总数不受分类/关键词影响
        let today_filter = ResourceFilter::default().created_since(window.start);
        let today_total = self
            .repo
            .count_resources(&today_filter)
            .await
            .unwrap_or_else(|e| {
                warn!("Failed to count today's resources: {}", e);
                0
            });

        Ok(ResourcePage {
            items,
            total,
            today_total,
            current_page: page.page,
            last_page: total_pages(total, page.page_size),
            per_page: page.page_size,
        })
    }

    /// 资源详情，顺带增长浏览量
    pub async fn resource_detail(&self, unique_id: &str) -> Result<ResourceDetail> {
        self.resource_detail_at(unique_id, Utc::now()).await
    }

    pub async fn resource_detail_at(
        &self,
        unique_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ResourceDetail> {
        let unique_id = unique_id.trim();
        if unique_id.is_empty() {
            return Err(CatalogError::not_found("Resource not found"));
        }

        let (mut resource, links) = self
            .repo
            .find_resource(unique_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Resource not found"))?;

        let last_update = view_growth::baseline(resource.updated_at, resource.created_at);
        let bump = view_growth::estimate(last_update, now);
        match self
            .repo
            .bump_views(resource.id, bump.increment, bump.updated_at)
            .await
        {
            Ok(()) => {
                resource.views += bump.increment;
                resource.updated_at = Some(bump.updated_at);
                debug!("Resource {} views +{}", unique_id, bump.increment);
            }
            Err(e) => warn!("Failed to bump views for {}: {}", unique_id, e),
        }

        let total_links = links.len();
        Ok(ResourceDetail {
            resource,
            links_by_type: group_links_by_type(links),
            total_links,
        })
    }

    /// 随机资源，出错时返回空列表
    pub async fn random_sample(&self, page_size: Option<i64>, since: Option<i64>) -> Vec<Resource> {
        let limit = PageRequest::first(positive_or(page_size, DEFAULT_RANDOM_SAMPLE_SIZE)).page_size;
        let since = since.and_then(|s| DateTime::<Utc>::from_timestamp(s, 0));

        self.repo
            .sample_resources(since, limit)
            .await
            .unwrap_or_else(|e| {
                warn!("Failed to sample resources: {}", e);
                Vec::new()
            })
    }

    /// 浏览量最高的资源，出错时返回空列表
    pub async fn hot_resources(&self, limit: Option<i64>) -> Vec<Resource> {
        let page = PageRequest::first(positive_or(limit, DEFAULT_HOT_RESOURCE_LIMIT));
        self.repo
            .list_resources(&ResourceFilter::default(), ResourceOrder::Views, page)
            .await
            .unwrap_or_else(|e| {
                warn!("Failed to load hot resources: {}", e);
                Vec::new()
            })
    }

    /// 关键词搜索（按浏览量倒序）
    pub async fn search(&self, keyword: &str) -> Result<Vec<SearchResult>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }

        let filter = ResourceFilter::default().with_keyword(Some(keyword));
        let resources = self
            .repo
            .list_resources(&filter, ResourceOrder::Views, PageRequest::first(self.search_limit))
            .await?;

        Ok(resources
            .into_iter()
            .map(|r| SearchResult {
                unique_id: r.unique_id,
                channel: r.channel,
                title: r.title,
                content: r.description,
                datetime: r.created_at,
                category: r.category,
            })
            .collect())
    }
}
