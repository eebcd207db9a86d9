use crate::config::ScrapeConfig;
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "archive-etl")]
#[command(about = "Export archive search results to a spreadsheet")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Number of result pages to scrape (skips the prompt)
    #[arg(long)]
    pub pages: Option<u32>,

    /// Scrape until results run out without asking for a page limit
    #[arg(long)]
    pub no_prompt: bool,

    /// Search results URL containing a {page} placeholder
    #[arg(long)]
    pub search_url: Option<String>,

    /// Origin prepended to relative links and image paths
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long)]
    pub user_agent: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Directory the output files are written to
    #[arg(long)]
    pub output_path: Option<String>,

    /// Output file name without extension
    #[arg(long)]
    pub filename: Option<String>,

    /// Output formats: xlsx, csv, json
    #[arg(long, value_delimiter = ',')]
    pub formats: Vec<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage")]
    pub monitor: bool,
}

impl CliConfig {
    /// 命令列參數覆蓋設定檔的值
    pub fn apply(&self, config: &mut ScrapeConfig) {
        if let Some(pages) = self.pages {
            config.page_limit = Some(i64::from(pages));
        }
        if let Some(url) = &self.search_url {
            config.search_url = url.clone();
        }
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(agent) = &self.user_agent {
            config.user_agent = agent.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = Some(timeout);
        }
        if let Some(path) = &self.output_path {
            config.output_path = path.clone();
        }
        if let Some(filename) = &self.filename {
            config.file_stem = filename.clone();
        }
        if !self.formats.is_empty() {
            config.output_formats = self.formats.clone();
        }
        if self.monitor {
            config.monitor = true;
        }
    }

    /// 只有在沒有任何來源提供頁數上限時才詢問使用者
    pub fn should_prompt(&self, config: &ScrapeConfig) -> bool {
        !self.no_prompt && config.page_limit.is_none()
    }
}
