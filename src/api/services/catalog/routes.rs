//! Catalog API 路由配置

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, error::InternalError, web};

use crate::api::constants::API_PREFIX;
use crate::api::middleware::TokenGate;

use super::categories::get_categories;
use super::error_code::ErrorCode;
use super::friend_links::{get_friend_links, post_friend_link};
use super::helpers::error_response;
use super::resources::{get_hot_resources, get_random_resources, get_resource, get_resources};

/// 请求体解析失败时也返回统一的 JSON 结构
fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let message = format!("Invalid parameters: {}", err);
    let response = error_response(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, &message);
    InternalError::from_response(err, response).into()
}

/// 资源路由
///
/// 包含：
/// - GET /collected-resources - 分页列表
/// - GET /collected-resources/random - 随机资源
/// - GET /collected-resources/hot - 热门资源
/// - GET /resource/{unique_id} - 资源详情
fn resource_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/collected-resources", web::get().to(get_resources))
        .route(
            "/collected-resources/random",
            web::get().to(get_random_resources),
        )
        .route("/collected-resources/hot", web::get().to(get_hot_resources))
        .route("/resource/{unique_id}", web::get().to(get_resource));
}

/// Catalog API 路由 `/api`，整组受共享密钥保护
///
/// 需要在 app 上注册 `Arc<CatalogService>` 与 `Arc<FriendLinkService>`。
/// 公开接口（搜索、健康检查）必须在此 scope 之前注册。
pub fn catalog_routes(
    token: &str,
) -> actix_web::Scope<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    web::scope(API_PREFIX)
        .wrap(TokenGate::new(token))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/categories", web::get().to(get_categories))
        .configure(resource_routes)
        .route("/friend-links", web::get().to(get_friend_links))
        .route("/friend-links", web::post().to(post_friend_link))
}
