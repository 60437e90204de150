use crate::core::source::RateSheetProvider;
use crate::providers::util::with_retry;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tracing::{debug, instrument};

const RETRY_DELAY_MS: u64 = 500;

/// Fetches a spreadsheet published to the web as HTML.
pub struct GoogleSheetsProvider {
    url: String,
    retries: usize,
}

impl GoogleSheetsProvider {
    pub fn new(url: &str, retries: usize) -> Self {
        GoogleSheetsProvider {
            url: url.to_string(),
            retries,
        }
    }
}

#[async_trait]
impl RateSheetProvider for GoogleSheetsProvider {
    #[instrument(name = "SheetFetch", skip(self), fields(url = %self.url))]
    async fn fetch_html(&self) -> Result<String> {
        debug!("Requesting rate sheet from {}", self.url);

        let client = reqwest::Client::builder()
            .user_agent(concat!("ratesheet/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let response = with_retry(
            || async {
                client
                    .get(&self.url)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
            },
            self.retries,
            RETRY_DELAY_MS,
        )
        .await
        .map_err(|e| match e.downcast_ref::<reqwest::Error>().and_then(|re| re.status()) {
            Some(status) => anyhow!("HTTP error: {} for URL: {}", status, self.url),
            None => anyhow!("Request error: {} for URL: {}", e, self.url),
        })?;

        debug!(status = %response.status(), "Received rate sheet response");

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", self.url))
    }
}
