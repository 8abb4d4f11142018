//! CLI command implementations

mod config_gen;
mod import;
mod seed;

pub use config_gen::config_generate;
pub use import::{ImportReport, import_file, import_records};
pub use seed::run_seed;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::StaticConfig;
use crate::storage::{SeaOrmStorage, StorageFactory};

/// 命令行模式下打开存储
async fn open_storage(config: &StaticConfig) -> Result<Arc<SeaOrmStorage>> {
    StorageFactory::create(config)
        .await
        .context("Failed to open storage")
}
