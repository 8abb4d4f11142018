use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;

use crate::catalog::HotTermTracker;
use crate::plugin::PluginRegistry;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub plugins_enabled: bool,
    pub plugin_count: usize,
    pub plugins: Vec<String>,
    /// 热词队列积压数
    pub hot_term_queue_pending: usize,
}

/// Health Service
///
/// 只读取进程内状态，不访问数据库。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        registry: web::Data<Arc<PluginRegistry>>,
        tracker: web::Data<Arc<HotTermTracker>>,
    ) -> impl Responder {
        trace!("Received health check request");

        let plugins = registry.names();
        HttpResponse::Ok()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(HealthResponse {
                status: "ok".to_string(),
                plugins_enabled: registry.is_initialized() && !plugins.is_empty(),
                plugin_count: plugins.len(),
                plugins,
                hot_term_queue_pending: tracker.pending(),
            })
    }
}

/// 健康检查路由 `/api/health`
pub fn health_routes() -> actix_web::Resource {
    web::resource("/api/health").route(web::get().to(HealthService::health_check))
}
