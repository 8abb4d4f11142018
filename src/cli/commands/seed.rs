//! Seed command

use anyhow::Result;
use colored::Colorize;

use crate::config::StaticConfig;
use crate::storage::seed::seed_defaults;

use super::open_storage;

pub async fn run_seed(config: &StaticConfig) -> Result<()> {
    let storage = open_storage(config).await?;
    let report = seed_defaults(storage.as_ref()).await;

    println!(
        "{} {} categories, {} friend links",
        "Seeded".green(),
        report.categories.to_string().cyan(),
        report.friend_links.to_string().cyan()
    );
    if report.category_failures > 0 {
        println!(
            "  {} {} categories failed, see log for details",
            "Warning:".yellow(),
            report.category_failures
        );
    }
    Ok(())
}
