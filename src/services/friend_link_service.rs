//! Friend-link service
//!
//! Listing applies referer ranking on top of the enabled links; upserts
//! validate input and reject normalized-URL duplicates before inserting.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::catalog::friend_rank::{DEFAULT_DISPLAY_LIMIT, is_duplicate_url, rank_friend_links};
use crate::errors::{CatalogError, Result};
use crate::storage::CatalogRepository;
use crate::storage::models::{FRIEND_LINK_PENDING, FriendLink, FriendLinkDraft};

/// 网址重复时返回给提交方的提示
pub const DUPLICATE_URL_MESSAGE: &str = "该网址已存在或已在申请中，请勿重复提交";

/// 友链提交（新建或更新）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FriendLinkSubmission {
    /// 大于 0 时表示更新
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sort: Option<i32>,
    #[serde(default)]
    pub status: Option<i32>,
}

impl FriendLinkSubmission {
    fn required_fields(&self) -> Result<(String, String, String)> {
        let name = self.name.trim();
        let url = self.url.trim();
        let category = self.category.trim();

        if name.is_empty() || url.is_empty() || category.is_empty() {
            return Err(CatalogError::validation(
                "name, url and category are required",
            ));
        }

        Ok((name.to_string(), url.to_string(), category.to_string()))
    }

    /// 校验必填字段并转成新建用的 draft
    pub fn into_draft(self) -> Result<FriendLinkDraft> {
        let (name, url, category) = self.required_fields()?;

        Ok(FriendLinkDraft {
            name,
            url,
            icon: self.icon.unwrap_or_default().trim().to_string(),
            description: self.description.unwrap_or_default().trim().to_string(),
            category,
            sort: self.sort.unwrap_or(0),
            status: self.status.unwrap_or(FRIEND_LINK_PENDING),
        })
    }

    /// 合并到已存在的友链上，未提供或为零值的字段保持原值
    pub fn merge_into(self, existing: &FriendLink) -> Result<FriendLinkDraft> {
        let (name, url, category) = self.required_fields()?;

        Ok(FriendLinkDraft {
            name,
            url,
            icon: non_blank(self.icon).unwrap_or_else(|| existing.icon.clone()),
            description: non_blank(self.description)
                .unwrap_or_else(|| existing.description.clone()),
            category,
            sort: self.sort.filter(|v| *v != 0).unwrap_or(existing.sort),
            status: self.status.filter(|v| *v != 0).unwrap_or(existing.status),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct FriendLinkService {
    repo: Arc<dyn CatalogRepository>,
    display_limit: usize,
}

impl FriendLinkService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self {
            repo,
            display_limit: DEFAULT_DISPLAY_LIMIT,
        }
    }

    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit.max(1);
        self
    }

    /// 已启用的友链，按 referer 重排
    pub async fn list(&self, referer: Option<&str>, show_all: bool) -> Result<Vec<FriendLink>> {
        let links = self.repo.list_friend_links(true).await?;
        trace!(
            "Ranking {} friend links (referer: {:?}, all: {})",
            links.len(),
            referer,
            show_all
        );
        Ok(rank_friend_links(
            links,
            referer,
            show_all,
            self.display_limit,
        ))
    }

    /// 新建或更新友链
    pub async fn upsert(&self, submission: FriendLinkSubmission) -> Result<FriendLink> {
        if let Some(id) = submission.id.filter(|id| *id > 0) {
            // 先校验再查库
            submission.required_fields()?;
            let existing = self
                .repo
                .find_friend_link(id)
                .await?
                .ok_or_else(|| CatalogError::not_found(format!("友链不存在: {}", id)))?;
            let draft = submission.merge_into(&existing)?;
            let link = self.repo.update_friend_link(id, &draft).await?;
            info!("Friend link {} updated: {}", link.id, link.url);
            return Ok(link);
        }

        let draft = submission.into_draft()?;

        // 查重包含未启用的友链
        let existing = self.repo.list_friend_links(false).await?;
        if is_duplicate_url(existing.iter().map(|l| l.url.as_str()), &draft.url) {
            return Err(CatalogError::conflict(DUPLICATE_URL_MESSAGE));
        }

        let link = self.repo.create_friend_link(&draft).await?;
        info!("Friend link {} created: {}", link.id, link.url);
        Ok(link)
    }
}
