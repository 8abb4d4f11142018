use chrono::{DateTime, Utc};

use crate::errors::{CatalogError, Result};

/// 单页最大条数
pub const MAX_PAGE_SIZE: u64 = 100;

/// 分页请求（页码从 1 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// 规范化分页参数
    ///
    /// 缺省或小于 1 的值回落到默认值，page_size 不超过 `MAX_PAGE_SIZE`。
    pub fn new(page: Option<i64>, page_size: Option<i64>, default_size: u64) -> Self {
        let page = page.filter(|p| *p >= 1).map(|p| p as u64).unwrap_or(1);
        let page_size = page_size
            .filter(|s| *s >= 1)
            .map(|s| s as u64)
            .unwrap_or(default_size)
            .clamp(1, MAX_PAGE_SIZE);
        Self { page, page_size }
    }

    /// 第一页，固定条数
    pub fn first(limit: u64) -> Self {
        Self {
            page: 1,
            page_size: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// `ceil(total / page_size)`，page_size 为 0 时返回 0
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// "今日"统计窗口的起点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodayWindow {
    pub start: DateTime<Utc>,
}

impl TodayWindow {
    pub const REQUIRED_MESSAGE: &'static str = "todayStart parameter is required";

    /// 从 Unix 秒构造；缺省或为 0 视为调用方错误
    pub fn from_unix(seconds: Option<i64>) -> Result<Self> {
        let seconds = match seconds {
            Some(s) if s != 0 => s,
            _ => return Err(CatalogError::validation(Self::REQUIRED_MESSAGE)),
        };
        DateTime::<Utc>::from_timestamp(seconds, 0)
            .map(|start| Self { start })
            .ok_or_else(|| CatalogError::validation(Self::REQUIRED_MESSAGE))
    }
}

/// 解析整数查询参数（页码、Unix 秒等），无法解析时返回 None
pub fn parse_query_int(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i64>().ok())
}
