//! 公开搜索接口（不受共享密钥保护）

use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::plugin::PluginRegistry;
use crate::storage::SearchResult;

use super::catalog::success_response;

#[derive(Deserialize, Clone, Debug, Default)]
pub struct SearchRequest {
    #[serde(default)]
    pub kw: Option<String>,
}

impl SearchRequest {
    fn keyword(&self) -> &str {
        self.kw.as_deref().map(str::trim).unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SearchResponse {
    pub total: usize,
    pub results: Vec<SearchResult>,
}

pub struct SearchService;

impl SearchService {
    pub async fn search_get(
        query: web::Query<SearchRequest>,
        registry: web::Data<Arc<PluginRegistry>>,
    ) -> ActixResult<HttpResponse> {
        Self::respond(query.keyword(), &registry).await
    }

    pub async fn search_post(
        body: web::Json<SearchRequest>,
        registry: web::Data<Arc<PluginRegistry>>,
    ) -> ActixResult<HttpResponse> {
        Self::respond(body.keyword(), &registry).await
    }

    async fn respond(keyword: &str, registry: &PluginRegistry) -> ActixResult<HttpResponse> {
        let results = if keyword.is_empty() {
            Vec::new()
        } else {
            registry.search_all(keyword).await
        };
        debug!("Search '{}' returned {} results", keyword, results.len());

        Ok(success_response(SearchResponse {
            total: results.len(),
            results,
        }))
    }
}

/// 搜索路由 `/api/search`，支持 GET 与 POST
pub fn search_routes() -> actix_web::Resource {
    web::resource("/api/search")
        .route(web::get().to(SearchService::search_get))
        .route(web::post().to(SearchService::search_post))
}
