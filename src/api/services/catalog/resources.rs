//! 资源接口：列表、详情、随机、热门

use actix_web::{HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{error, trace};

use crate::catalog::parse_query_int;
use crate::errors::CatalogError;
use crate::services::{CatalogService, ResourceQuery};

use super::error_code::ErrorCode;
use super::helpers::{error_from_catalog, success_response};
use super::types::{
    HotQuery, HotResourceResponse, ItemsResponse, RandomQuery, ResourceDetailResponse,
    ResourceResponse, ResourcesQuery, ResourcesResponse,
};

/// GET /api/collected-resources
pub async fn get_resources(
    query: web::Query<ResourcesQuery>,
    service: web::Data<Arc<CatalogService>>,
) -> ActixResult<HttpResponse> {
    trace!("Catalog API: resources request {:?}", query);

    let request = ResourceQuery {
        page: parse_query_int(query.page.as_deref()),
        per_page: parse_query_int(query.per_page.as_deref()),
        category: query.category.clone(),
        keyword: query.keyword.clone(),
        sort: query.sort.clone(),
        today_start: parse_query_int(query.today_start.as_deref()),
    };

    match service.list_resources(request).await {
        Ok(page) => Ok(success_response(ResourcesResponse::from(page))),
        Err(e @ CatalogError::Validation(_)) => {
            Ok(error_from_catalog(&e, Some(ErrorCode::InvalidTimestamp)))
        }
        Err(e) => {
            error!("Catalog API: failed to list resources: {}", e);
            Ok(error_from_catalog(&e, Some(ErrorCode::ResourceQueryFailed)))
        }
    }
}

/// GET /api/resource/{unique_id}
pub async fn get_resource(
    path: web::Path<String>,
    service: web::Data<Arc<CatalogService>>,
) -> ActixResult<HttpResponse> {
    let unique_id = path.into_inner();
    trace!("Catalog API: resource detail for {}", unique_id);

    match service.resource_detail(&unique_id).await {
        Ok(detail) => Ok(success_response(ResourceDetailResponse::from(detail))),
        Err(e @ CatalogError::NotFound(_)) => {
            Ok(error_from_catalog(&e, Some(ErrorCode::ResourceNotFound)))
        }
        Err(e) => {
            error!("Catalog API: failed to load resource {}: {}", unique_id, e);
            Ok(error_from_catalog(&e, Some(ErrorCode::ResourceQueryFailed)))
        }
    }
}

/// GET /api/collected-resources/random
pub async fn get_random_resources(
    query: web::Query<RandomQuery>,
    service: web::Data<Arc<CatalogService>>,
) -> ActixResult<HttpResponse> {
    let items = service
        .random_sample(
            parse_query_int(query.page_size.as_deref()),
            parse_query_int(query.start_time.as_deref()),
        )
        .await;

    Ok(success_response(ItemsResponse::new(
        items.into_iter().map(ResourceResponse::from).collect(),
    )))
}

/// GET /api/collected-resources/hot
pub async fn get_hot_resources(
    query: web::Query<HotQuery>,
    service: web::Data<Arc<CatalogService>>,
) -> ActixResult<HttpResponse> {
    let items = service
        .hot_resources(parse_query_int(query.limit.as_deref()))
        .await;

    Ok(success_response(ItemsResponse::new(
        items.into_iter().map(HotResourceResponse::from).collect(),
    )))
}
