//! Catalog API 类型定义

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::{CategoryOverview, CategoryPage, ResourceDetail, ResourcePage};
use crate::storage::{FriendLink, Resource, ResourceLink};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

/// 只有一个 items 字段的列表响应
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ItemsResponse<T> {
    pub items: Vec<T>,
}

impl<T> ItemsResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

// ============ 查询参数 ============
//
// 数字参数以字符串接收，解析失败时回落到默认值而不是直接 400。

#[derive(Deserialize, Clone, Debug, Default)]
pub struct CategoriesQuery {
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
    pub limit: Option<String>,
    pub keyword: Option<String>,
    #[serde(rename = "todayStart")]
    pub today_start: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ResourcesQuery {
    pub page: Option<String>,
    #[serde(rename = "perPage")]
    pub per_page: Option<String>,
    pub category: Option<String>,
    pub keyword: Option<String>,
    pub sort: Option<String>,
    #[serde(rename = "todayStart")]
    pub today_start: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct RandomQuery {
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
    #[serde(rename = "startTime")]
    pub start_time: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct HotQuery {
    pub limit: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct FriendLinksQuery {
    pub all: Option<String>,
}

impl FriendLinksQuery {
    pub fn show_all(&self) -> bool {
        self.all.as_deref().map(str::trim) == Some("true")
    }
}

// ============ 分类 ============

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HotTermResponse {
    pub term: String,
    pub score: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub alias: String,
    pub icon: String,
    pub items: Vec<HotTermResponse>,
    pub today_count: u64,
}

impl From<CategoryOverview> for CategoryResponse {
    fn from(overview: CategoryOverview) -> Self {
        let CategoryOverview {
            category,
            hot_terms,
            today_count,
        } = overview;
        Self {
            id: category.id,
            name: category.name,
            alias: category.alias,
            icon: category.icon,
            items: hot_terms
                .into_iter()
                .map(|item| HotTermResponse {
                    term: item.term,
                    score: item.score,
                })
                .collect(),
            today_count,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryResponse>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl From<CategoryPage> for CategoriesResponse {
    fn from(page: CategoryPage) -> Self {
        Self {
            categories: page.categories.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

// ============ 资源 ============

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ResourceResponse {
    pub id: i64,
    pub unique_id: String,
    pub channel: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub image_url: String,
    pub original_content: String,
    pub quality: String,
    pub year: Option<i32>,
    pub views: i64,
    pub status: i32,
    pub category: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl From<Resource> for ResourceResponse {
    fn from(r: Resource) -> Self {
        Self {
            id: r.id,
            unique_id: r.unique_id,
            channel: r.channel,
            title: r.title,
            description: r.description,
            tags: r.tags.0,
            image_url: r.image_url,
            original_content: r.original_content,
            quality: r.quality,
            year: r.year,
            views: r.views,
            status: r.status,
            category: r.category,
            created_at: r.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ResourcesResponse {
    pub items: Vec<ResourceResponse>,
    pub total: u64,
    pub today_total: u64,
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
}

impl From<ResourcePage> for ResourcesResponse {
    fn from(page: ResourcePage) -> Self {
        Self {
            items: page.items.into_iter().map(Into::into).collect(),
            total: page.total,
            today_total: page.today_total,
            current_page: page.current_page,
            last_page: page.last_page,
            per_page: page.per_page,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LinkEntryResponse {
    pub url: String,
    pub password: String,
    pub note: String,
    pub source: String,
}

impl From<ResourceLink> for LinkEntryResponse {
    fn from(link: ResourceLink) -> Self {
        Self {
            url: link.url,
            password: link.password,
            note: link.note,
            source: link.source,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ResourceDetailResponse {
    pub id: i64,
    pub unique_id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub image_url: String,
    pub original_content: String,
    pub quality: String,
    pub year: Option<i32>,
    pub views: i64,
    pub category: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub total_links: usize,
    pub merged_by_type: BTreeMap<String, Vec<LinkEntryResponse>>,
}

impl From<ResourceDetail> for ResourceDetailResponse {
    fn from(detail: ResourceDetail) -> Self {
        let r = detail.resource;
        Self {
            id: r.id,
            unique_id: r.unique_id,
            title: r.title,
            description: r.description,
            tags: r.tags.0,
            image_url: r.image_url,
            original_content: r.original_content,
            quality: r.quality,
            year: r.year,
            views: r.views,
            category: r.category,
            created_at: r.created_at,
            total_links: detail.total_links,
            merged_by_type: detail
                .links_by_type
                .into_iter()
                .map(|(cloud_type, links)| {
                    (cloud_type, links.into_iter().map(Into::into).collect())
                })
                .collect(),
        }
    }
}

/// 热门资源只返回精简字段
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HotResourceResponse {
    pub id: i64,
    pub unique_id: String,
    pub title: String,
    pub views: i64,
    pub category: String,
}

impl From<Resource> for HotResourceResponse {
    fn from(r: Resource) -> Self {
        Self {
            id: r.id,
            unique_id: r.unique_id,
            title: r.title,
            views: r.views,
            category: r.category,
        }
    }
}

// ============ 友链 ============

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FriendLinkResponse {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub icon: String,
    pub description: String,
    pub category: String,
    pub sort: i32,
    pub status: i32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl From<FriendLink> for FriendLinkResponse {
    fn from(link: FriendLink) -> Self {
        Self {
            id: link.id,
            name: link.name,
            url: link.url,
            icon: link.icon,
            description: link.description,
            category: link.category,
            sort: link.sort,
            status: link.status,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}
