use crate::domain::ports::Fetcher;
use crate::utils::error::{Result, ScrapeError};
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36";

/// reqwest 用戶端，固定 User-Agent，不重試
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status != StatusCode::OK {
            return Err(ScrapeError::HttpStatusError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_sends_user_agent_and_returns_body() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/results")
                .header("user-agent", DEFAULT_USER_AGENT);
            then.status(200)
                .header("Content-Type", "text/html")
                .body("<html><body>ok</body></html>");
        });

        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT, None).unwrap();
        let body = fetcher.fetch(&server.url("/results")).await.unwrap();

        page_mock.assert();
        assert!(body.contains("ok"));
    }

    #[tokio::test]
    async fn test_non_200_status_is_failure() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET).path("/gone");
            then.status(404).body("not found");
        });

        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT, None).unwrap();
        let err = fetcher.fetch(&server.url("/gone")).await.unwrap_err();

        page_mock.assert();
        assert!(matches!(err, ScrapeError::HttpStatusError { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_other_success_codes_are_failures() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/empty");
            then.status(204);
        });

        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT, None).unwrap();
        let err = fetcher.fetch(&server.url("/empty")).await.unwrap_err();
        assert!(matches!(err, ScrapeError::HttpStatusError { status: 204, .. }));
    }

    #[tokio::test]
    async fn test_transport_error_is_failure() {
        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT, Some(Duration::from_secs(2))).unwrap();
        let err = fetcher.fetch("http://127.0.0.1:1/unreachable").await.unwrap_err();
        assert!(matches!(err, ScrapeError::ApiError(_)));
    }
}
