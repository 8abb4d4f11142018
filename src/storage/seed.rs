//! 启动时的默认数据
//!
//! 分类按 alias 幂等 upsert；友链只在表为空时写入。

use tracing::{info, warn};

use crate::storage::CatalogRepository;
use crate::storage::models::{CategorySeed, FRIEND_LINK_ENABLED, FriendLinkDraft};

/// 默认分类 (alias, 名称)
pub const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("all", "全部资源"),
    ("movie", "电影"),
    ("series", "剧集"),
    ("anime", "动漫"),
    ("play", "综艺"),
    ("ebook", "电子书"),
    ("game", "游戏"),
    ("software", "软件"),
    ("course", "教程"),
    ("document", "文档"),
    ("music", "音乐"),
    ("code", "源码"),
    ("welfare", "福利"),
    ("other", "其他"),
];

pub fn default_category_seeds() -> Vec<CategorySeed> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(alias, name)| CategorySeed::new(alias, name))
        .collect()
}

pub fn default_friend_links() -> Vec<FriendLinkDraft> {
    vec![
        FriendLinkDraft {
            name: "盘搜".to_string(),
            url: "https://pansou.cn".to_string(),
            icon: String::new(),
            description: "极简单的网盘搜索".to_string(),
            category: "搜索".to_string(),
            sort: 1,
            status: FRIEND_LINK_ENABLED,
        },
        FriendLinkDraft {
            name: "苏拉搜索".to_string(),
            url: "https://soula.io".to_string(),
            icon: String::new(),
            description: "专业网盘搜索引擎".to_string(),
            category: "搜索".to_string(),
            sort: 2,
            status: FRIEND_LINK_ENABLED,
        },
    ]
}

/// 写入结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub category_failures: usize,
    pub friend_links: usize,
}

/// 写入默认数据，失败只记日志
pub async fn seed_defaults(repo: &dyn CatalogRepository) -> SeedReport {
    let mut report = SeedReport::default();

    for seed in default_category_seeds() {
        match repo.upsert_category(&seed).await {
            Ok(_) => report.categories += 1,
            Err(e) => {
                report.category_failures += 1;
                warn!("Failed to seed category '{}': {}", seed.alias, e);
            }
        }
    }

    match repo.seed_friend_links(&default_friend_links()).await {
        Ok(n) => report.friend_links = n,
        Err(e) => warn!("Failed to seed friend links: {}", e),
    }

    info!(
        "Seeded {} categories ({} failed), {} friend links",
        report.categories, report.category_failures, report.friend_links
    );
    report
}
