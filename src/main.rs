use archive_etl::config::prompt::prompt_page_limit;
use archive_etl::utils::monitor::SystemMonitor;
use archive_etl::utils::{logger, validation::Validate};
use archive_etl::{
    ArchivePipeline, CliConfig, EtlEngine, HttpFetcher, LocalStorage, ScrapeConfig, TomlConfig,
};
use clap::Parser;
use std::time::Instant;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 計時包含互動提示的等待時間
    let started = Instant::now();
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting archive-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(file_config) => file_config.into_scrape_config(),
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => ScrapeConfig::default(),
    };
    cli.apply(&mut config);

    // 驗證配置；提示輸入的頁數照原樣使用，不在此檢查
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if cli.should_prompt(&config) {
        let stdin = std::io::stdin();
        config.page_limit = prompt_page_limit(&mut stdin.lock(), &mut std::io::stdout())?;
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let fetcher = HttpFetcher::new(&config.user_agent, config.timeout())?;
    let storage = LocalStorage::from_config(&config);
    let monitor = SystemMonitor::started_at(started, config.monitor);
    let pipeline = ArchivePipeline::new(fetcher, storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor);

    match engine.run().await {
        Ok(report) => {
            tracing::info!(
                "✅ Exported {} records from {} pages in {}s",
                report.record_count,
                report.pages_scraped,
                report.elapsed_seconds
            );
            for path in &report.output_paths {
                tracing::info!("📁 Output saved to: {}", path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Scrape failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
