#[cfg(feature = "cli")]
pub mod cli;
pub mod prompt;
pub mod toml_config;

use crate::adapters::http::DEFAULT_USER_AGENT;
use crate::core::extractor::SelectorConfig;
use crate::core::pipeline::SUPPORTED_FORMATS;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://historicengland.org.uk";
pub const DEFAULT_SEARCH_URL: &str = "https://historicengland.org.uk/images-books/photos/results/?searchType=HE+Archive+New&search=jlp01&filteroption=images&page={page}";
pub const DEFAULT_FILE_STEM: &str = "historic_england_results";

/// 一次執行所需的全部設定，由設定檔、命令列與互動提示合併而成
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub search_url: String,
    pub user_agent: String,
    pub timeout_seconds: Option<u64>,
    pub page_limit: Option<i64>,
    pub selectors: SelectorConfig,
    pub output_path: String,
    pub file_stem: String,
    pub output_formats: Vec<String>,
    pub monitor: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: None,
            page_limit: None,
            selectors: SelectorConfig::default(),
            output_path: ".".to_string(),
            file_stem: DEFAULT_FILE_STEM.to_string(),
            output_formats: vec!["xlsx".to_string()],
            monitor: false,
        }
    }
}

impl ScrapeConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl ConfigProvider for ScrapeConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self) -> &str {
        &self.search_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn file_stem(&self) -> &str {
        &self.file_stem
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn page_limit(&self) -> Option<i64> {
        self.page_limit
    }

    fn selectors(&self) -> &SelectorConfig {
        &self.selectors
    }
}

impl Validate for ScrapeConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.base_url", &self.base_url)?;
        validation::validate_page_template("source.search_url", &self.search_url)?;
        validation::validate_non_empty_string("source.user_agent", &self.user_agent)?;
        validation::validate_path("load.output_path", &self.output_path)?;
        validation::validate_non_empty_string("load.filename", &self.file_stem)?;
        validation::validate_formats("load.output_formats", &self.output_formats, &SUPPORTED_FORMATS)?;
        if let Some(limit) = self.page_limit {
            validation::validate_positive_number("extract.page_limit", limit, 1)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            if timeout == 0 {
                return Err(crate::utils::error::ScrapeError::InvalidConfigValueError {
                    field: "source.timeout_seconds".to_string(),
                    value: timeout.to_string(),
                    reason: "Timeout must be at least 1 second".to_string(),
                });
            }
        }
        Ok(())
    }
}
