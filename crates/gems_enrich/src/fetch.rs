use std::time::Duration;

use async_trait::async_trait;
use gems_core::Result;
use reqwest::Client;
use tracing::debug;

const PAGE_TIMEOUT: Duration = Duration::from_secs(20);

/// Fetches the HTML of one article page. A trait so the batch job can run
/// against canned pages in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(PAGE_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching article page - url={}", url);
        let resp = self.client.get(url).send().await?.error_for_status()?;
        Ok(resp.text().await?)
    }
}
