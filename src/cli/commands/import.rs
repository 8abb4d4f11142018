//! Import command
//!
//! Feeds already-parsed resource records through `upsert_resource`.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::warn;

use crate::config::StaticConfig;
use crate::storage::models::UpsertOutcome;
use crate::storage::{CatalogRepository, ResourceRecord};

use super::open_storage;

/// 导入结果统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
}

/// 逐条写入，单条失败不影响其他记录
pub async fn import_records(
    repo: &dyn CatalogRepository,
    records: &[ResourceRecord],
) -> ImportReport {
    let mut report = ImportReport::default();
    for record in records {
        match repo.upsert_resource(record).await {
            Ok((_, UpsertOutcome::Created)) => report.created += 1,
            Ok((_, UpsertOutcome::Updated)) => report.updated += 1,
            Err(e) => {
                report.failed += 1;
                warn!("Failed to import '{}': {}", record.unique_id, e);
            }
        }
    }
    report
}

/// 读取 JSON 数组文件
pub fn read_records(path: &Path) -> Result<Vec<ResourceRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse resource records in {}", path.display()))
}

pub async fn import_file(config: &StaticConfig, file_path: &str) -> Result<ImportReport> {
    let records = read_records(Path::new(file_path))?;
    println!(
        "{} {} records from {}",
        "Importing".yellow(),
        records.len().to_string().cyan(),
        file_path.blue()
    );

    let storage = open_storage(config).await?;
    let report = import_records(storage.as_ref(), &records).await;

    println!(
        "  {} created, {} updated, {} failed",
        report.created.to_string().green(),
        report.updated.to_string().green(),
        if report.failed > 0 {
            report.failed.to_string().red()
        } else {
            report.failed.to_string().normal()
        }
    );
    Ok(report)
}
