//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::warn;

use crate::api::constants::TOKEN_HEADER;
use crate::api::services::{health_routes, search_routes};
use crate::catalog::HotTermTracker;
use crate::config::ApiConfig;
use crate::plugin::PluginRegistry;
use crate::runtime::lifetime;

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(api: &ApiConfig) {
    if api.cors_enabled && api.cors_allowed_origins.is_empty() {
        warn!(
            "CORS enabled but cors_allowed_origins is empty. \
            No cross-origin requests will be allowed. \
            Set cors_allowed_origins explicitly or use '[\"*\"]' for any origin."
        );
    }
}

/// Build CORS middleware from configuration
fn build_cors_middleware(api: &ApiConfig) -> Cors {
    // When CORS is disabled, use browser's default same-origin policy (restrictive)
    if !api.cors_enabled {
        return Cors::default();
    }

    let mut cors = Cors::default();

    if api.cors_allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &api.cors_allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_header("Content-Type")
        .allowed_header("Accept")
        .allowed_header(TOKEN_HEADER)
        .max_age(api.cors_max_age)
}

/// 注册全部路由
///
/// 公开接口（搜索、健康检查）先于插件路由注册，插件的 `/api` scope
/// 不会拦截它们。
pub fn configure_app(
    cfg: &mut web::ServiceConfig,
    registry: Arc<PluginRegistry>,
    tracker: Arc<HotTermTracker>,
) {
    cfg.app_data(web::Data::new(registry.clone()))
        .app_data(web::Data::new(tracker))
        .service(search_routes())
        .service(health_routes());
    registry.configure_routes(cfg);
}

/// Run the HTTP server
///
/// This function:
/// 1. Prepares storage, the hot-term worker and plugins
/// 2. Configures and starts the HTTP server
/// 3. Listens for graceful shutdown signals
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let config = crate::config::get_config();

    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;

    let registry = startup.registry.clone();
    let tracker = startup.tracker.clone();
    let api_config = config.api.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    validate_cors_config(&api_config);

    let server = HttpServer::new(move || {
        let cors = build_cors_middleware(&api_config);
        let registry = registry.clone();
        let tracker = tracker.clone();

        App::new()
            .wrap(cors)
            .wrap(Compress::default())
            .app_data(web::PayloadConfig::new(1024 * 1024))
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .configure(move |cfg| configure_app(cfg, registry, tracker))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res?;
            lifetime::shutdown::perform_shutdown_tasks(&startup.tracker).await;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&startup.tracker) => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}
