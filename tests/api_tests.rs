//! HTTP API tests
//!
//! Full app wiring (public search/health plus the token-gated catalog scope)
//! against a temporary SQLite database.

use actix_web::http::{Method, StatusCode};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;

use soula::catalog::HotTermTracker;
use soula::config::{DatabaseConfig, StaticConfig};
use soula::plugin::PluginRegistry;
use soula::runtime::lifetime::startup::build_registry;
use soula::runtime::modes::configure_app;
use soula::storage::{CatalogReader, CatalogRepository, CatalogWriter, ResourceRecord, SeaOrmStorage};

// =============================================================================
// Test Setup
// =============================================================================

const TOKEN: &str = "test-shared-token";

struct TestContext {
    storage: Arc<SeaOrmStorage>,
    registry: Arc<PluginRegistry>,
    tracker: Arc<HotTermTracker>,
    _dir: TempDir,
}

impl TestContext {
    async fn new(token: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("api.db");
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let storage = Arc::new(
            SeaOrmStorage::new(&db_url, "sqlite", &DatabaseConfig::default())
                .await
                .expect("Failed to create storage"),
        );

        let mut config = StaticConfig::default();
        config.api.token = token.to_string();

        let repo: Arc<dyn CatalogRepository> = storage.clone();
        let (registry, tracker) = build_registry(repo, &config);
        registry
            .initialize_all()
            .await
            .expect("Failed to initialize plugins");

        Self {
            storage,
            registry: Arc::new(registry),
            tracker,
            _dir: temp_dir,
        }
    }

    fn configure(&self) -> impl FnOnce(&mut web::ServiceConfig) + 'static {
        let registry = self.registry.clone();
        let tracker = self.tracker.clone();
        move |cfg| configure_app(cfg, registry, tracker)
    }

    async fn insert_resource(&self, unique_id: &str, title: &str, category: &str) {
        let record = ResourceRecord {
            unique_id: unique_id.to_string(),
            channel: "tg".to_string(),
            title: title.to_string(),
            description: String::new(),
            original_content: String::new(),
            tags: vec!["4K".to_string()],
            image_url: String::new(),
            category: category.to_string(),
            quality: String::new(),
            year: None,
            datetime: None,
            links: Vec::new(),
        };
        self.storage
            .upsert_resource(&record)
            .await
            .expect("Failed to insert resource");
    }
}

fn today_start() -> i64 {
    (Utc::now() - Duration::hours(1)).timestamp()
}

// =============================================================================
// 共享密钥
// =============================================================================

#[actix_web::test]
async fn test_missing_token_is_rejected() {
    let ctx = TestContext::new(TOKEN).await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = TestRequest::get()
        .uri(&format!("/api/categories?todayStart={}", today_start()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2000);
}

#[actix_web::test]
async fn test_wrong_token_is_rejected() {
    let ctx = TestContext::new(TOKEN).await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = TestRequest::get()
        .uri("/api/friend-links")
        .insert_header(("X-Token", "nope"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2001);
}

#[actix_web::test]
async fn test_empty_configured_token_disables_gated_routes() {
    let ctx = TestContext::new("").await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = TestRequest::get()
        .uri("/api/friend-links")
        .insert_header(("X-Token", ""))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 公开接口不受影响
    let req = TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_options_preflight_skips_token() {
    let ctx = TestContext::new(TOKEN).await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/api/categories")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

// =============================================================================
// 分类与资源
// =============================================================================

#[actix_web::test]
async fn test_categories_require_today_start() {
    let ctx = TestContext::new(TOKEN).await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = TestRequest::get()
        .uri("/api/categories")
        .insert_header(("X-Token", TOKEN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1012);
    assert_eq!(body["message"], "todayStart parameter is required");
}

#[actix_web::test]
async fn test_categories_listing() {
    let ctx = TestContext::new(TOKEN).await;
    ctx.insert_resource("m1", "沙丘", "movie").await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = TestRequest::get()
        .uri(&format!(
            "/api/categories?todayStart={}&pageSize=5",
            today_start()
        ))
        .insert_header(("X-Token", TOKEN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    let data = &body["data"];
    assert_eq!(data["total"], 14);
    assert_eq!(data["total_pages"], 3);
    assert_eq!(data["categories"].as_array().unwrap().len(), 5);
    assert_eq!(data["categories"][0]["alias"], "all");
    assert_eq!(data["categories"][0]["today_count"], 1);
}

#[actix_web::test]
async fn test_resources_listing_with_lenient_params() {
    let ctx = TestContext::new(TOKEN).await;
    for i in 0..3 {
        ctx.insert_resource(&format!("r{i}"), "资源", "movie").await;
    }
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = TestRequest::get()
        .uri(&format!(
            "/api/collected-resources?todayStart={}&perPage=abc&page=1",
            today_start()
        ))
        .insert_header(("X-Token", TOKEN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["per_page"], 10);
    assert_eq!(body["data"]["today_total"], 3);
    assert_eq!(body["data"]["items"][0]["tags"][0], "4K");
}

#[actix_web::test]
async fn test_resource_detail_found_and_missing() {
    let ctx = TestContext::new(TOKEN).await;
    ctx.insert_resource("abc", "三体", "series").await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = TestRequest::get()
        .uri("/api/resource/abc")
        .insert_header(("X-Token", TOKEN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let views = body["data"]["views"].as_i64().unwrap();
    assert!((10..=20).contains(&views));
    assert_eq!(body["data"]["total_links"], 0);

    let req = TestRequest::get()
        .uri("/api/resource/missing")
        .insert_header(("X-Token", TOKEN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3000);
}

#[actix_web::test]
async fn test_random_and_hot_resources() {
    let ctx = TestContext::new(TOKEN).await;
    for i in 0..4 {
        ctx.insert_resource(&format!("r{i}"), "资源", "movie").await;
    }
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = TestRequest::get()
        .uri("/api/collected-resources/random?pageSize=2")
        .insert_header(("X-Token", TOKEN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);

    let req = TestRequest::get()
        .uri("/api/collected-resources/hot?limit=3")
        .insert_header(("X-Token", TOKEN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 3);
}

// =============================================================================
// 友链
// =============================================================================

#[actix_web::test]
async fn test_friend_links_seeded_and_ranked_by_referer() {
    let ctx = TestContext::new(TOKEN).await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = TestRequest::get()
        .uri("/api/friend-links")
        .insert_header(("X-Token", TOKEN))
        .insert_header(("Referer", "https://soula.io/search?q=x"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["url"], "https://soula.io");
}

#[actix_web::test]
async fn test_post_friend_link_duplicate() {
    let ctx = TestContext::new(TOKEN).await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = TestRequest::post()
        .uri("/api/friend-links")
        .insert_header(("X-Token", TOKEN))
        .set_json(json!({"name": "盘搜镜像", "url": "http://pansou.cn/", "category": "搜索"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4001);
    assert_eq!(ctx.storage.list_friend_links(false).await.unwrap().len(), 2);
}

#[actix_web::test]
async fn test_post_friend_link_created_as_pending() {
    let ctx = TestContext::new(TOKEN).await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = TestRequest::post()
        .uri("/api/friend-links")
        .insert_header(("X-Token", TOKEN))
        .set_json(json!({"name": "新站", "url": "https://new.example", "category": "工具"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], 0);
    assert_eq!(ctx.storage.list_friend_links(false).await.unwrap().len(), 3);
}

#[actix_web::test]
async fn test_post_friend_link_validation_errors() {
    let ctx = TestContext::new(TOKEN).await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = TestRequest::post()
        .uri("/api/friend-links")
        .insert_header(("X-Token", TOKEN))
        .set_json(json!({"name": "", "url": "https://x.example"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4000);

    // 请求体不是 JSON
    let req = TestRequest::post()
        .uri("/api/friend-links")
        .insert_header(("X-Token", TOKEN))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1000);
}

// =============================================================================
// 公开接口
// =============================================================================

#[actix_web::test]
async fn test_search_is_public_and_tracks_hot_terms() {
    let ctx = TestContext::new(TOKEN).await;
    ctx.insert_resource("d1", "沙丘 第一部", "movie").await;
    ctx.insert_resource("d2", "沙丘 第二部", "movie").await;
    ctx.insert_resource("s1", "沙丘 剧版", "series").await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = TestRequest::post()
        .uri("/api/search")
        .set_json(json!({"kw": "沙丘"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total"], 3);

    assert!(ctx.tracker.drain(std::time::Duration::from_secs(5)).await);
    let movie = ctx
        .storage
        .find_category_by_alias("movie")
        .await
        .unwrap()
        .unwrap();
    let item = ctx
        .storage
        .find_hot_term(movie.id, "沙丘")
        .await
        .unwrap()
        .expect("hot term should be recorded under the majority category");
    assert_eq!(item.score, 1);

    let req = TestRequest::get().uri("/api/search?kw=").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total"], 0);
}

#[actix_web::test]
async fn test_health_check() {
    let ctx = TestContext::new(TOKEN).await;
    let app = test::init_service(App::new().configure(ctx.configure())).await;

    let req = TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["plugins_enabled"], true);
    assert_eq!(body["plugins"][0], "soula");
    assert_eq!(body["hot_term_queue_pending"], 0);
}
