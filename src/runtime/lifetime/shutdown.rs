use std::time::Duration;
use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::catalog::HotTermTracker;

/// 关闭超时时间（秒）
const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// 单个任务超时时间（秒）
const TASK_TIMEOUT_SECS: u64 = 10;

pub async fn listen_for_shutdown(tracker: &HotTermTracker) {
    // 等待 Ctrl+C 信号
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, draining background work...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    let shutdown_result = timeout(
        Duration::from_secs(SHUTDOWN_TIMEOUT_SECS),
        perform_shutdown_tasks(tracker),
    )
    .await;

    match shutdown_result {
        Ok(()) => info!("All shutdown tasks completed successfully"),
        Err(_) => error!(
            "Shutdown tasks timed out after {} seconds",
            SHUTDOWN_TIMEOUT_SECS
        ),
    }
}

/// 执行所有关闭任务（在超时内调用）
pub async fn perform_shutdown_tasks(tracker: &HotTermTracker) {
    let pending = tracker.pending();
    if pending == 0 {
        info!("Hot-term queue is empty, nothing to drain");
        return;
    }

    info!("Draining {} pending hot-term jobs", pending);
    if tracker.drain(Duration::from_secs(TASK_TIMEOUT_SECS)).await {
        info!("Hot-term queue drained");
    } else {
        error!(
            "Hot-term queue drain timed out after {} seconds, {} jobs dropped",
            TASK_TIMEOUT_SECS,
            tracker.pending()
        );
    }
}
