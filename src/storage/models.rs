use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// "全部"分类的别名，作为过滤条件时表示不过滤
pub const ALL_CATEGORY_ALIAS: &str = "all";

/// 友链状态：已启用
pub const FRIEND_LINK_ENABLED: i32 = 1;
/// 友链状态：待审核
pub const FRIEND_LINK_PENDING: i32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub alias: String,
    pub icon: String,
}

/// 分类种子（按 alias upsert）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySeed {
    pub name: String,
    pub alias: String,
    pub icon: String,
}

impl CategorySeed {
    pub fn new(alias: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            alias: alias.to_string(),
            icon: alias.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotSearchItem {
    pub id: i64,
    pub category_id: i64,
    pub term: String,
    pub score: i64,
}

/// 资源标签
///
/// 落库时是一段 JSON 文本；解析失败一律当成空列表处理。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(pub Vec<String>);

impl Tags {
    pub fn decode(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        Tags(serde_json::from_str::<Vec<String>>(raw).unwrap_or_default())
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for Tags {
    fn from(tags: Vec<String>) -> Self {
        Tags(tags)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: i64,
    pub unique_id: String,
    pub channel: String,
    pub title: String,
    pub description: String,
    pub original_content: String,
    pub tags: Tags,
    pub image_url: String,
    pub category: String,
    pub quality: String,
    pub year: Option<i32>,
    pub views: i64,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub id: i64,
    pub resource_id: i64,
    pub cloud_type: String,
    pub url: String,
    pub password: String,
    pub note: String,
    pub source: String,
    pub status: i32,
    pub created_at: DateTime<Utc>,
}

/// 网盘类型
///
/// 入库时统一成规范名，未知类型落到 `others`。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CloudType {
    #[strum(to_string = "alipan", serialize = "aliyun", serialize = "aliyundrive")]
    Alipan,
    Quark,
    Baidu,
    Uc,
    #[strum(to_string = "xunlei", serialize = "thunder")]
    Xunlei,
    #[strum(to_string = "115")]
    Pan115,
    #[strum(to_string = "tianyi", serialize = "189")]
    Tianyi,
    Pikpak,
    #[strum(to_string = "123")]
    Pan123,
    Mobile,
    Magnet,
    Ed2k,
    Others,
}

impl CloudType {
    /// 宽松解析，未知类型返回 `Others`
    pub fn parse_lenient(raw: &str) -> Self {
        raw.trim().parse().unwrap_or(CloudType::Others)
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendLink {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub icon: String,
    pub description: String,
    pub category: String,
    pub sort: i32,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FriendLink {
    pub fn is_enabled(&self) -> bool {
        self.status == FRIEND_LINK_ENABLED
    }
}

/// 新建/更新友链时的输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendLinkDraft {
    pub name: String,
    pub url: String,
    pub icon: String,
    pub description: String,
    pub category: String,
    pub sort: i32,
    pub status: i32,
}

/// 上游解析完成后的资源记录，作为入库边界
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub unique_id: String,
    #[serde(default)]
    pub channel: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub original_content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quality: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub datetime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub links: Vec<LinkRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    #[serde(rename = "type", alias = "cloud_type")]
    pub cloud_type: String,
    pub url: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub source: String,
}

/// 搜索结果，对外统一格式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub unique_id: String,
    pub channel: String,
    pub title: String,
    pub content: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub datetime: DateTime<Utc>,
    pub category: String,
}

/// upsert_resource 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}
