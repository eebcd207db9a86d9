use crate::core::extractor::RecordExtractor;
use crate::core::image::ImageResolver;
use crate::domain::model::{PageResult, ScrapeRun, StopReason, NO_IMAGE};
use crate::domain::ports::Fetcher;
use crate::utils::error::Result;
use crate::utils::validation::PAGE_PLACEHOLDER;

pub fn page_url(template: &str, page: u32) -> String {
    template.replace(PAGE_PLACEHOLDER, &page.to_string())
}

/// 依序抓取第 1、2、3… 頁，直到頁面沒有結果或達到頁數上限
pub struct PaginationDriver<'a, F: Fetcher> {
    fetcher: &'a F,
    extractor: &'a RecordExtractor,
    search_url: &'a str,
    base_url: &'a str,
    page_limit: Option<i64>,
}

impl<'a, F: Fetcher> PaginationDriver<'a, F> {
    pub fn new(
        fetcher: &'a F,
        extractor: &'a RecordExtractor,
        search_url: &'a str,
        base_url: &'a str,
        page_limit: Option<i64>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            search_url,
            base_url,
            page_limit,
        }
    }

    pub async fn run(&self) -> Result<ScrapeRun> {
        let mut run = ScrapeRun::new();
        let mut page: u32 = 1;

        let reason = loop {
            if let Some(limit) = self.page_limit {
                if i64::from(page) > limit {
                    break StopReason::LimitReached(limit);
                }
            }

            println!("Scraping page {}...", page);
            let result = self.scrape_page(page).await?;

            if result.is_empty() {
                break StopReason::Exhausted;
            }

            tracing::info!("📄 Page {}: {} records", page, result.records.len());
            run.append(result);
            page += 1;
        };

        println!("{}", reason);
        tracing::info!(
            "🏁 Stopped after {} pages with {} records: {:?}",
            run.pages_scraped,
            run.records.len(),
            reason
        );
        Ok(run.finish(reason))
    }

    /// A page that cannot be fetched counts as an empty page.
    pub async fn scrape_page(&self, page: u32) -> Result<PageResult> {
        let url = page_url(self.search_url, page);

        let body = match self.fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("⚠️ Page {} could not be fetched: {}", page, e);
                return Ok(PageResult::empty(page));
            }
        };

        let items = self.extractor.extract_items(&body, page)?;
        let resolver = ImageResolver::new(self.fetcher, self.base_url);

        let mut records = Vec::with_capacity(items.len());
        for item in items {
            let image = match item.image_path.as_deref() {
                Some(path) => resolver.resolve(path).await,
                None => Some(NO_IMAGE.to_string()),
            };
            records.push(item.into_record(self.base_url, image));
        }

        Ok(PageResult { page, records })
    }
}
