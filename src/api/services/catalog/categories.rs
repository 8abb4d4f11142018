//! 分类与热搜词接口

use actix_web::{HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{error, trace};

use crate::catalog::parse_query_int;
use crate::errors::CatalogError;
use crate::services::{CatalogService, CategoryQuery};

use super::error_code::ErrorCode;
use super::helpers::{error_from_catalog, success_response};
use super::types::{CategoriesQuery, CategoriesResponse};

/// GET /api/categories
pub async fn get_categories(
    query: web::Query<CategoriesQuery>,
    service: web::Data<Arc<CatalogService>>,
) -> ActixResult<HttpResponse> {
    trace!("Catalog API: categories request {:?}", query);

    let request = CategoryQuery {
        page: parse_query_int(query.page.as_deref()),
        page_size: parse_query_int(query.page_size.as_deref()),
        limit: parse_query_int(query.limit.as_deref()),
        keyword: query.keyword.clone(),
        today_start: parse_query_int(query.today_start.as_deref()),
    };

    match service.categories_with_hot_terms(request).await {
        Ok(page) => Ok(success_response(CategoriesResponse::from(page))),
        Err(e @ CatalogError::Validation(_)) => {
            Ok(error_from_catalog(&e, Some(ErrorCode::InvalidTimestamp)))
        }
        Err(e) => {
            error!("Catalog API: failed to load categories: {}", e);
            Ok(error_from_catalog(&e, Some(ErrorCode::CategoryQueryFailed)))
        }
    }
}
