use crate::config::ScrapeConfig;
use crate::core::extractor::SelectorConfig;
use crate::utils::error::{Result, ScrapeError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 設定檔；所有區段皆可省略，省略時使用預設值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub extract: ExtractConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub search_url: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub page_limit: Option<i64>,
    pub selectors: Option<SelectorConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: Option<String>,
    pub filename: Option<String>,
    pub output_formats: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScrapeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${USER_AGENT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScrapeError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 套用到預設設定上
    pub fn into_scrape_config(self) -> ScrapeConfig {
        let defaults = ScrapeConfig::default();
        ScrapeConfig {
            base_url: self.source.base_url.unwrap_or(defaults.base_url),
            search_url: self.source.search_url.unwrap_or(defaults.search_url),
            user_agent: self.source.user_agent.unwrap_or(defaults.user_agent),
            timeout_seconds: self.source.timeout_seconds.or(defaults.timeout_seconds),
            page_limit: self.extract.page_limit.or(defaults.page_limit),
            selectors: self.extract.selectors.unwrap_or(defaults.selectors),
            output_path: self.load.output_path.unwrap_or(defaults.output_path),
            file_stem: self.load.filename.unwrap_or(defaults.file_stem),
            output_formats: self.load.output_formats.unwrap_or(defaults.output_formats),
            monitor: self.monitoring.map(|m| m.enabled).unwrap_or(defaults.monitor),
        }
    }
}
