use crate::core::document::{parse_document, visible_text};
use crate::core::extractor::absolute_url;
use crate::domain::ports::Fetcher;

/// 取得圖片詳細頁面，並以整頁可見文字作為 Image 欄位的值
pub struct ImageResolver<'a, F: Fetcher> {
    fetcher: &'a F,
    base_url: &'a str,
}

impl<'a, F: Fetcher> ImageResolver<'a, F> {
    pub fn new(fetcher: &'a F, base_url: &'a str) -> Self {
        Self { fetcher, base_url }
    }

    /// `None` when the detail page could not be fetched. Never fails the run.
    pub async fn resolve(&self, path: &str) -> Option<String> {
        let url = absolute_url(self.base_url, path);
        tracing::debug!("Resolving image detail page: {}", url);

        match self.fetcher.fetch(&url).await {
            Ok(body) => Some(page_text(&body)),
            Err(e) => {
                tracing::warn!("⚠️ Image detail fetch failed: {}", e);
                println!("Failed to retrieve page: {}", url);
                None
            }
        }
    }
}

fn page_text(html: &str) -> String {
    visible_text(&parse_document(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{Result, ScrapeError};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MapFetcher {
        pages: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl MapFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.to_string()))
                    .collect(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    impl Fetcher for MapFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| ScrapeError::HttpStatusError {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    #[tokio::test]
    async fn test_resolve_returns_visible_page_text() {
        let fetcher = MapFetcher::new(&[(
            "https://historicengland.org.uk/images-books/photos/item/JLP01/01/001",
            "<html><head><title>Kenwood</title><script>track()</script></head><body><h1> Kenwood House </h1><p>Aerial view</p></body></html>",
        )]);
        let resolver = ImageResolver::new(&fetcher, "https://historicengland.org.uk");

        let text = resolver
            .resolve("/images-books/photos/item/JLP01/01/001")
            .await;

        assert_eq!(text.as_deref(), Some("KenwoodKenwood HouseAerial view"));
        assert_eq!(
            fetcher.requested.lock().unwrap().as_slice(),
            ["https://historicengland.org.uk/images-books/photos/item/JLP01/01/001"]
        );
    }

    #[tokio::test]
    async fn test_resolve_keeps_noscript_text() {
        let fetcher = MapFetcher::new(&[(
            "https://historicengland.org.uk/image/1",
            "<html><body><noscript><img src=\"/x.jpg\"><p>Enable JavaScript to view</p></noscript><p>Kenwood</p></body></html>",
        )]);
        let resolver = ImageResolver::new(&fetcher, "https://historicengland.org.uk");

        let text = resolver.resolve("/image/1").await;

        assert_eq!(text.as_deref(), Some("Enable JavaScript to viewKenwood"));
    }

    #[tokio::test]
    async fn test_resolve_failure_is_none() {
        let fetcher = MapFetcher::new(&[]);
        let resolver = ImageResolver::new(&fetcher, "https://historicengland.org.uk");

        assert_eq!(resolver.resolve("/missing").await, None);
        assert_eq!(fetcher.requested.lock().unwrap().len(), 1);
    }
}
