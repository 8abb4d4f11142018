//! Storage backend tests
//!
//! Tests for SeaOrmStorage using temporary SQLite databases.

use chrono::{Duration, Utc};
use soula::catalog::PageRequest;
use soula::config::DatabaseConfig;
use soula::errors::CatalogError;
use soula::storage::backend::{SeaOrmStorage, infer_backend_from_url};
use soula::storage::models::{
    FRIEND_LINK_ENABLED, FRIEND_LINK_PENDING, LinkRecord, UpsertOutcome,
};
use soula::storage::seed::{default_friend_links, seed_defaults};
use soula::storage::{
    CatalogReader, CatalogWriter, CategorySeed, FriendLinkDraft, ResourceFilter, ResourceOrder,
    ResourceRecord,
};
use tempfile::TempDir;

// =============================================================================
// Test Setup
// =============================================================================

/// 创建临时 SQLite 数据库的存储实例
async fn create_temp_storage() -> (SeaOrmStorage, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite", &DatabaseConfig::default())
        .await
        .expect("Failed to create storage");

    (storage, temp_dir)
}

fn link(cloud_type: &str, url: &str) -> LinkRecord {
    LinkRecord {
        cloud_type: cloud_type.to_string(),
        url: url.to_string(),
        password: String::new(),
        note: String::new(),
        source: "tg".to_string(),
    }
}

fn record(unique_id: &str, title: &str, category: &str) -> ResourceRecord {
    ResourceRecord {
        unique_id: unique_id.to_string(),
        channel: "tg".to_string(),
        title: title.to_string(),
        description: format!("{} 描述", title),
        original_content: String::new(),
        tags: vec!["4K".to_string()],
        image_url: String::new(),
        category: category.to_string(),
        quality: "1080p".to_string(),
        year: Some(2024),
        datetime: None,
        links: vec![link("quark", "https://pan.quark.cn/s/1")],
    }
}

fn draft(name: &str, url: &str, status: i32) -> FriendLinkDraft {
    FriendLinkDraft {
        name: name.to_string(),
        url: url.to_string(),
        icon: String::new(),
        description: String::new(),
        category: "搜索".to_string(),
        sort: 0,
        status,
    }
}

// =============================================================================
// URL 推断测试
// =============================================================================

#[cfg(test)]
mod url_inference_tests {
    use super::*;

    #[test]
    fn test_infer_backend() {
        assert_eq!(infer_backend_from_url("sqlite://data.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("soula.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url(":memory:").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("mysql://u:p@h/db").unwrap(), "mysql");
        assert_eq!(infer_backend_from_url("mariadb://u:p@h/db").unwrap(), "mysql");
        assert_eq!(infer_backend_from_url("postgres://u@h/db").unwrap(), "postgres");
    }

    #[test]
    fn test_infer_backend_unknown_scheme() {
        let err = infer_backend_from_url("redis://localhost").unwrap_err();
        assert!(matches!(err, CatalogError::DatabaseConfig(_)));
    }
}

// =============================================================================
// 分类与热词
// =============================================================================

#[cfg(test)]
mod category_tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_category_is_idempotent() {
        let (storage, _dir) = create_temp_storage().await;

        let first = storage
            .upsert_category(&CategorySeed::new("movie", "电影"))
            .await
            .unwrap();
        let mut renamed = CategorySeed::new("movie", "影视");
        renamed.icon = "film".to_string();
        let second = storage.upsert_category(&renamed).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "影视");
        assert_eq!(second.icon, "film");
        assert_eq!(storage.count_categories().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_seed_defaults_twice_keeps_fourteen_categories() {
        let (storage, _dir) = create_temp_storage().await;

        let report = seed_defaults(&storage).await;
        assert_eq!(report.categories, 14);
        assert_eq!(report.friend_links, 2);

        let report = seed_defaults(&storage).await;
        assert_eq!(report.categories, 14);
        assert_eq!(report.friend_links, 0);

        assert_eq!(storage.count_categories().await.unwrap(), 14);
        let page = storage
            .list_categories(PageRequest::new(None, None, 100))
            .await
            .unwrap();
        assert_eq!(page[0].alias, "all");
        assert_eq!(storage.list_friend_links(false).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_categories_pagination() {
        let (storage, _dir) = create_temp_storage().await;
        seed_defaults(&storage).await;

        let page = storage
            .list_categories(PageRequest::new(Some(2), Some(5), 100))
            .await
            .unwrap();
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].alias, "ebook");

        let last = storage
            .list_categories(PageRequest::new(Some(3), Some(5), 100))
            .await
            .unwrap();
        assert_eq!(last.len(), 4);
    }

    #[tokio::test]
    async fn test_hot_term_create_and_increment() {
        let (storage, _dir) = create_temp_storage().await;
        let movie = storage
            .upsert_category(&CategorySeed::new("movie", "电影"))
            .await
            .unwrap();

        let item = storage.create_hot_term(movie.id, "流浪地球").await.unwrap();
        assert_eq!(item.score, 1);

        storage.increment_hot_term(item.id).await.unwrap();
        storage.increment_hot_term(item.id).await.unwrap();

        let found = storage
            .find_hot_term(movie.id, "流浪地球")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.score, 3);
        assert!(storage.find_hot_term(movie.id, "沙丘").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_top_hot_terms_ordered_by_score() {
        let (storage, _dir) = create_temp_storage().await;
        let movie = storage
            .upsert_category(&CategorySeed::new("movie", "电影"))
            .await
            .unwrap();

        let low = storage.create_hot_term(movie.id, "a").await.unwrap();
        let high = storage.create_hot_term(movie.id, "b").await.unwrap();
        storage.create_hot_term(movie.id, "c").await.unwrap();
        for _ in 0..3 {
            storage.increment_hot_term(high.id).await.unwrap();
        }
        storage.increment_hot_term(low.id).await.unwrap();

        let top = storage.top_hot_terms(movie.id, 2).await.unwrap();
        let terms: Vec<_> = top.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(terms, vec!["b", "a"]);
    }
}

// =============================================================================
// 资源
// =============================================================================

#[cfg(test)]
mod resource_tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_resource_create_then_update() {
        let (storage, _dir) = create_temp_storage().await;

        let (created, outcome) = storage
            .upsert_resource(&record("r1", "流浪地球", "movie"))
            .await
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Created);
        assert_eq!(created.views, 0);
        assert_eq!(created.tags.as_slice(), ["4K".to_string()]);

        storage.bump_views(created.id, 15, Utc::now()).await.unwrap();

        let mut changed = record("r1", "流浪地球2", "movie");
        changed.links = vec![
            link("aliyun", "https://www.alipan.com/s/a"),
            link("baidu", "https://pan.baidu.com/s/b"),
        ];
        let (updated, outcome) = storage.upsert_resource(&changed).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "流浪地球2");
        // 更新不会清掉浏览量
        assert_eq!(updated.views, 15);

        let (_, links) = storage.find_resource("r1").await.unwrap().unwrap();
        let types: Vec<_> = links.iter().map(|l| l.cloud_type.as_str()).collect();
        assert_eq!(types, vec!["alipan", "baidu"]);
    }

    #[tokio::test]
    async fn test_upsert_resource_rejects_blank_unique_id() {
        let (storage, _dir) = create_temp_storage().await;
        let err = storage
            .upsert_resource(&record("  ", "x", "movie"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_bump_views_sets_updated_at() {
        let (storage, _dir) = create_temp_storage().await;
        let (resource, _) = storage
            .upsert_resource(&record("r1", "沙丘", "movie"))
            .await
            .unwrap();
        assert!(resource.updated_at.is_none());

        let at = Utc::now();
        storage.bump_views(resource.id, 42, at).await.unwrap();
        storage.bump_views(resource.id, 8, at).await.unwrap();

        let (found, _) = storage.find_resource("r1").await.unwrap().unwrap();
        assert_eq!(found.views, 50);
        let updated_at = found.updated_at.expect("updated_at should be set");
        assert_eq!(updated_at.timestamp(), at.timestamp());
    }

    #[tokio::test]
    async fn test_find_resource_missing() {
        let (storage, _dir) = create_temp_storage().await;
        assert!(storage.find_resource("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_filters_and_ordering() {
        let (storage, _dir) = create_temp_storage().await;
        let now = Utc::now();

        let mut old = record("old", "老电影", "movie");
        old.datetime = Some(now - Duration::days(3));
        let (old, _) = storage.upsert_resource(&old).await.unwrap();
        let (new, _) = storage
            .upsert_resource(&record("new", "新剧", "series"))
            .await
            .unwrap();
        storage.bump_views(old.id, 100, now).await.unwrap();

        let all = ResourceFilter::default();
        assert_eq!(storage.count_resources(&all).await.unwrap(), 2);

        let movies = ResourceFilter::default().with_category(Some("movie"));
        assert_eq!(storage.count_resources(&movies).await.unwrap(), 1);

        let everything = ResourceFilter::default().with_category(Some("all"));
        assert_eq!(storage.count_resources(&everything).await.unwrap(), 2);

        let today = ResourceFilter::default().created_since(now - Duration::hours(1));
        assert_eq!(storage.count_resources(&today).await.unwrap(), 1);

        let keyword = ResourceFilter::default().with_keyword(Some("新剧"));
        assert_eq!(storage.count_resources(&keyword).await.unwrap(), 1);

        let latest = storage
            .list_resources(&all, ResourceOrder::Latest, PageRequest::first(10))
            .await
            .unwrap();
        assert_eq!(latest[0].id, new.id);

        let hot = storage
            .list_resources(&all, ResourceOrder::Views, PageRequest::first(10))
            .await
            .unwrap();
        assert_eq!(hot[0].id, old.id);
    }

    #[tokio::test]
    async fn test_sample_resources_respects_since_and_limit() {
        let (storage, _dir) = create_temp_storage().await;
        let now = Utc::now();

        for i in 0..5 {
            let mut r = record(&format!("old-{i}"), "old", "movie");
            r.datetime = Some(now - Duration::days(10));
            storage.upsert_resource(&r).await.unwrap();
        }
        for i in 0..3 {
            storage
                .upsert_resource(&record(&format!("new-{i}"), "new", "movie"))
                .await
                .unwrap();
        }

        let sample = storage.sample_resources(None, 4).await.unwrap();
        assert_eq!(sample.len(), 4);

        let recent = storage
            .sample_resources(Some(now - Duration::days(1)), 10)
            .await
            .unwrap();
        assert_eq!(recent.len(), 3);
        assert!(recent.iter().all(|r| r.unique_id.starts_with("new-")));
    }
}

// =============================================================================
// 友链
// =============================================================================

#[cfg(test)]
mod friend_link_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_only_enabled_sorted() {
        let (storage, _dir) = create_temp_storage().await;

        let mut b = draft("B", "https://b.com", FRIEND_LINK_ENABLED);
        b.sort = 2;
        let mut a = draft("A", "https://a.com", FRIEND_LINK_ENABLED);
        a.sort = 1;
        storage.create_friend_link(&b).await.unwrap();
        storage.create_friend_link(&a).await.unwrap();
        storage
            .create_friend_link(&draft("P", "https://p.com", FRIEND_LINK_PENDING))
            .await
            .unwrap();

        let enabled = storage.list_friend_links(true).await.unwrap();
        let names: Vec<_> = enabled.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);

        assert_eq!(storage.list_friend_links(false).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_writes_invalidate_cache() {
        let (storage, _dir) = create_temp_storage().await;

        assert!(storage.list_friend_links(true).await.unwrap().is_empty());

        let created = storage
            .create_friend_link(&draft("A", "https://a.com", FRIEND_LINK_ENABLED))
            .await
            .unwrap();
        assert_eq!(storage.list_friend_links(true).await.unwrap().len(), 1);

        let mut disabled = draft("A", "https://a.com", FRIEND_LINK_PENDING);
        disabled.description = "paused".to_string();
        let updated = storage
            .update_friend_link(created.id, &disabled)
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.status, FRIEND_LINK_PENDING);
        assert!(storage.list_friend_links(true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let (storage, _dir) = create_temp_storage().await;
        let err = storage
            .update_friend_link(999, &draft("X", "https://x.com", FRIEND_LINK_ENABLED))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
        assert!(storage.find_friend_link(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_seed_only_when_table_empty() {
        let (storage, _dir) = create_temp_storage().await;
        storage
            .create_friend_link(&draft("Mine", "https://mine.com", FRIEND_LINK_ENABLED))
            .await
            .unwrap();

        let seeded = storage
            .seed_friend_links(&default_friend_links())
            .await
            .unwrap();
        assert_eq!(seeded, 0);
        assert_eq!(storage.list_friend_links(false).await.unwrap().len(), 1);
    }
}
