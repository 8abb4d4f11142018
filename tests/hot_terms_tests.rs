//! Hot-term tracker tests
//!
//! Majority attribution against a real SQLite store, plus queue behaviour
//! and failure isolation with a repository that always errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use soula::catalog::{HotTermTracker, PageRequest};
use soula::config::DatabaseConfig;
use soula::errors::{CatalogError, Result};
use soula::storage::models::UpsertOutcome;
use soula::storage::seed::seed_defaults;
use soula::storage::{
    CatalogReader, CatalogRepository, CatalogWriter, Category, CategorySeed, FriendLink,
    FriendLinkDraft, HotSearchItem, Resource, ResourceFilter, ResourceLink, ResourceOrder,
    ResourceRecord, SearchResult, SeaOrmStorage,
};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

// =============================================================================
// Test Setup
// =============================================================================

async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("hot_terms.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite", &DatabaseConfig::default())
        .await
        .expect("Failed to create storage");

    (Arc::new(storage), temp_dir)
}

fn categories(cats: &[&str]) -> Vec<String> {
    cats.iter().map(|c| c.to_string()).collect()
}

fn search_result(category: &str) -> SearchResult {
    SearchResult {
        unique_id: format!("u-{category}"),
        channel: "tg".to_string(),
        title: "t".to_string(),
        content: String::new(),
        datetime: Utc::now(),
        category: category.to_string(),
    }
}

async fn term_score(storage: &SeaOrmStorage, alias: &str, term: &str) -> Option<i64> {
    let category = storage
        .find_category_by_alias(alias)
        .await
        .unwrap()
        .expect("category should exist");
    storage
        .find_hot_term(category.id, term)
        .await
        .unwrap()
        .map(|item| item.score)
}

/// 所有操作都失败的仓储
struct FailingRepo;

fn boom<T>() -> Result<T> {
    Err(CatalogError::database_operation("database is down"))
}

#[async_trait]
impl CatalogReader for FailingRepo {
    async fn count_categories(&self) -> Result<u64> {
        boom()
    }
    async fn list_categories(&self, _page: PageRequest) -> Result<Vec<Category>> {
        boom()
    }
    async fn find_category_by_alias(&self, _alias: &str) -> Result<Option<Category>> {
        boom()
    }
    async fn top_hot_terms(&self, _category_id: i64, _limit: u64) -> Result<Vec<HotSearchItem>> {
        boom()
    }
    async fn find_hot_term(&self, _category_id: i64, _term: &str) -> Result<Option<HotSearchItem>> {
        boom()
    }
    async fn count_resources(&self, _filter: &ResourceFilter) -> Result<u64> {
        boom()
    }
    async fn list_resources(
        &self,
        _filter: &ResourceFilter,
        _order: ResourceOrder,
        _page: PageRequest,
    ) -> Result<Vec<Resource>> {
        boom()
    }
    async fn sample_resources(
        &self,
        _created_since: Option<DateTime<Utc>>,
        _limit: u64,
    ) -> Result<Vec<Resource>> {
        boom()
    }
    async fn find_resource(
        &self,
        _unique_id: &str,
    ) -> Result<Option<(Resource, Vec<ResourceLink>)>> {
        boom()
    }
    async fn list_friend_links(&self, _only_enabled: bool) -> Result<Vec<FriendLink>> {
        boom()
    }
    async fn find_friend_link(&self, _id: i64) -> Result<Option<FriendLink>> {
        boom()
    }
}

#[async_trait]
impl CatalogWriter for FailingRepo {
    async fn upsert_category(&self, _seed: &CategorySeed) -> Result<Category> {
        boom()
    }
    async fn create_hot_term(&self, _category_id: i64, _term: &str) -> Result<HotSearchItem> {
        boom()
    }
    async fn increment_hot_term(&self, _id: i64) -> Result<()> {
        boom()
    }
    async fn bump_views(&self, _id: i64, _increment: i64, _at: DateTime<Utc>) -> Result<()> {
        boom()
    }
    async fn upsert_resource(
        &self,
        _record: &ResourceRecord,
    ) -> Result<(Resource, UpsertOutcome)> {
        boom()
    }
    async fn create_friend_link(&self, _draft: &FriendLinkDraft) -> Result<FriendLink> {
        boom()
    }
    async fn update_friend_link(&self, _id: i64, _draft: &FriendLinkDraft) -> Result<FriendLink> {
        boom()
    }
    async fn seed_friend_links(&self, _seeds: &[FriendLinkDraft]) -> Result<usize> {
        boom()
    }
}

// =============================================================================
// 多数分类归属
// =============================================================================

#[cfg(test)]
mod attribution_tests {
    use super::*;

    #[tokio::test]
    async fn test_majority_category_gets_the_term() {
        let (storage, _dir) = create_temp_storage().await;
        seed_defaults(storage.as_ref()).await;
        let (tracker, _rx) = HotTermTracker::new(storage.clone(), 8);

        tracker
            .record("流浪地球", &categories(&["movie", "movie", "series"]))
            .await;
        assert_eq!(term_score(&storage, "movie", "流浪地球").await, Some(1));
        assert_eq!(term_score(&storage, "series", "流浪地球").await, None);

        // 再次搜索只累加分数，不产生新行
        tracker
            .record("流浪地球", &categories(&["movie", "movie", "series"]))
            .await;
        assert_eq!(term_score(&storage, "movie", "流浪地球").await, Some(2));

        let movie = storage.find_category_by_alias("movie").await.unwrap().unwrap();
        let top = storage.top_hot_terms(movie.id, 24).await.unwrap();
        assert_eq!(top.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_category_falls_back_to_all() {
        let (storage, _dir) = create_temp_storage().await;
        seed_defaults(storage.as_ref()).await;
        let (tracker, _rx) = HotTermTracker::new(storage.clone(), 8);

        tracker.record("沙丘", &categories(&["podcast", "podcast"])).await;
        assert_eq!(term_score(&storage, "all", "沙丘").await, Some(1));
    }

    #[tokio::test]
    async fn test_blank_categories_fall_back_to_all() {
        let (storage, _dir) = create_temp_storage().await;
        seed_defaults(storage.as_ref()).await;
        let (tracker, _rx) = HotTermTracker::new(storage.clone(), 8);

        tracker.record("三体", &categories(&["", ""])).await;
        assert_eq!(term_score(&storage, "all", "三体").await, Some(1));
    }

    #[tokio::test]
    async fn test_missing_all_category_skips_silently() {
        let (storage, _dir) = create_temp_storage().await;
        let (tracker, _rx) = HotTermTracker::new(storage.clone(), 8);

        tracker.record("无分类", &categories(&["movie"])).await;
        assert_eq!(storage.count_categories().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_keyword_or_results_is_noop() {
        let (storage, _dir) = create_temp_storage().await;
        seed_defaults(storage.as_ref()).await;
        let (tracker, _rx) = HotTermTracker::new(storage.clone(), 8);

        tracker.record("  ", &categories(&["movie"])).await;
        tracker.record("沙丘", &[]).await;

        let movie = storage.find_category_by_alias("movie").await.unwrap().unwrap();
        assert!(storage.top_hot_terms(movie.id, 24).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repository_errors_are_swallowed() {
        let (tracker, _rx) = HotTermTracker::new(Arc::new(FailingRepo), 8);
        // 不 panic、不返回错误即可
        tracker.record("流浪地球", &categories(&["movie"])).await;
    }
}

// =============================================================================
// 异步队列
// =============================================================================

#[cfg(test)]
mod queue_tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_is_processed_by_worker() {
        let (storage, _dir) = create_temp_storage().await;
        seed_defaults(storage.as_ref()).await;
        let repo: Arc<dyn CatalogRepository> = storage.clone();
        let tracker = HotTermTracker::spawn(repo, 16);

        let results = vec![search_result("anime"), search_result("anime")];
        assert!(tracker.submit("葬送的芙莉莲", &results));
        assert!(tracker.submit("葬送的芙莉莲", &results));

        assert!(tracker.drain(Duration::from_secs(5)).await);
        assert_eq!(tracker.pending(), 0);
        assert_eq!(term_score(&storage, "anime", "葬送的芙莉莲").await, Some(2));
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_input() {
        let (tracker, _rx) = HotTermTracker::new(Arc::new(FailingRepo), 4);
        assert!(!tracker.submit("", &[search_result("movie")]));
        assert!(!tracker.submit("沙丘", &[]));
        assert_eq!(tracker.pending(), 0);
    }

    #[tokio::test]
    async fn test_full_queue_drops_jobs() {
        // 不启动 worker，队列满后直接丢弃
        let (tracker, _rx) = HotTermTracker::new(Arc::new(FailingRepo), 1);
        let results = vec![search_result("movie")];

        assert!(tracker.submit("a", &results));
        assert!(!tracker.submit("b", &results));
        assert_eq!(tracker.pending(), 1);
        assert!(!tracker.drain(Duration::from_millis(50)).await);
    }

    #[tokio::test]
    async fn test_closed_queue_drops_jobs() {
        let (tracker, rx) = HotTermTracker::new(Arc::new(FailingRepo), 4);
        drop(rx);
        assert!(!tracker.submit("a", &[search_result("movie")]));
        assert_eq!(tracker.pending(), 0);
    }

    #[tokio::test]
    async fn test_worker_survives_failing_repository() {
        let tracker = HotTermTracker::spawn(Arc::new(FailingRepo), 4);
        assert!(tracker.submit("a", &[search_result("movie")]));
        assert!(tracker.submit("b", &[search_result("movie")]));
        assert!(tracker.drain(Duration::from_secs(5)).await);
    }
}
