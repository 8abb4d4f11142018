//! Friend-link ranking
//!
//! Moves the friend link matching the inbound `Referer` to the front so a
//! partner site sees itself first, then truncates to the display limit.

use crate::storage::models::FriendLink;

/// 默认展示条数
pub const DEFAULT_DISPLAY_LIMIT: usize = 8;

/// 规范化 URL
///
/// 依次去掉 `https://`、`http://`、`//` 前缀和一个结尾 `/`，再转小写。
pub fn normalize_url(raw: &str) -> String {
    let mut s = raw;
    s = s.strip_prefix("https://").unwrap_or(s);
    s = s.strip_prefix("http://").unwrap_or(s);
    s = s.strip_prefix("//").unwrap_or(s);
    s = s.strip_suffix('/').unwrap_or(s);
    s.to_lowercase()
}

/// 找出第一个与 referer 前缀匹配的友链下标
///
/// 规范化后为空的友链 URL 不参与匹配。
pub fn find_referer_match(links: &[FriendLink], referer: &str) -> Option<usize> {
    let referer = normalize_url(referer);
    if referer.is_empty() {
        return None;
    }
    links.iter().position(|link| {
        let candidate = normalize_url(&link.url);
        !candidate.is_empty() && referer.starts_with(&candidate)
    })
}

/// 重排并截断友链
///
/// `links` 需已按 (sort asc, id asc) 排好序；其余条目保持相对顺序。
pub fn rank_friend_links(
    mut links: Vec<FriendLink>,
    referer: Option<&str>,
    show_all: bool,
    limit: usize,
) -> Vec<FriendLink> {
    if let Some(referer) = referer
        && let Some(idx) = find_referer_match(&links, referer)
        && idx > 0
    {
        let matched = links.remove(idx);
        links.insert(0, matched);
    }

    if !show_all && links.len() > limit {
        links.truncate(limit);
    }
    links
}

/// 判断候选 URL 是否与已有友链重复（比较规范化结果）
pub fn is_duplicate_url<'a, I>(existing: I, candidate: &str) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let candidate = normalize_url(candidate);
    existing
        .into_iter()
        .any(|url| normalize_url(url) == candidate)
}
