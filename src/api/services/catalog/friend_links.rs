//! 友链接口

use actix_web::http::header::REFERER;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{error, info};

use crate::errors::CatalogError;
use crate::services::{FriendLinkService, FriendLinkSubmission};

use super::error_code::ErrorCode;
use super::helpers::{error_from_catalog, success_response};
use super::types::{FriendLinkResponse, FriendLinksQuery, ItemsResponse};

/// GET /api/friend-links
pub async fn get_friend_links(
    req: HttpRequest,
    query: web::Query<FriendLinksQuery>,
    service: web::Data<Arc<FriendLinkService>>,
) -> ActixResult<HttpResponse> {
    let referer = req.headers().get(REFERER).and_then(|h| h.to_str().ok());

    match service.list(referer, query.show_all()).await {
        Ok(links) => Ok(success_response(ItemsResponse::new(
            links.into_iter().map(FriendLinkResponse::from).collect(),
        ))),
        Err(e) => {
            error!("Catalog API: failed to fetch friend links: {}", e);
            Ok(error_from_catalog(&e, None))
        }
    }
}

/// POST /api/friend-links
pub async fn post_friend_link(
    body: web::Json<FriendLinkSubmission>,
    service: web::Data<Arc<FriendLinkService>>,
) -> ActixResult<HttpResponse> {
    let submission = body.into_inner();
    info!("Catalog API: friend link submission for {}", submission.url);

    match service.upsert(submission).await {
        Ok(link) => Ok(success_response(FriendLinkResponse::from(link))),
        Err(e) => {
            let code = match &e {
                CatalogError::Validation(_) => ErrorCode::FriendLinkInvalid,
                CatalogError::Conflict(_) => ErrorCode::FriendLinkDuplicate,
                CatalogError::NotFound(_) => ErrorCode::FriendLinkNotFound,
                _ => {
                    error!("Catalog API: failed to save friend link: {}", e);
                    ErrorCode::FriendLinkWriteFailed
                }
            };
            Ok(error_from_catalog(&e, Some(code)))
        }
    }
}
