use anyhow::Result;
use clap::Parser;

use soula::cli::commands::{config_generate, import_file, run_seed};
use soula::cli::{Cli, Commands, ConfigCommands};
use soula::config::{get_config, init_config_from};
use soula::runtime::modes::run_server;
use soula::system::logging::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // 配置生成不需要加载已有配置
    if let Some(Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    }) = &cli.command
    {
        return config_generate(output_path.clone(), *force);
    }

    init_config_from(&cli.config);
    let config = get_config();
    let _guard = init_logging(&config.logging)?;

    match cli.command {
        None | Some(Commands::Serve) => run_server().await,
        Some(Commands::Seed) => run_seed(&config).await,
        Some(Commands::Import { file_path }) => import_file(&config, &file_path).await.map(|_| ()),
        Some(Commands::Config { .. }) => Ok(()),
    }
}
