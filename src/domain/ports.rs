use crate::core::extractor::SelectorConfig;
use crate::domain::model::{ScrapeRun, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 單次 GET；只有 200 視為成功
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn search_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn file_stem(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn page_limit(&self) -> Option<i64>;
    fn selectors(&self) -> &SelectorConfig;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ScrapeRun>;
    async fn transform(&self, run: ScrapeRun) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<Vec<String>>;
}
