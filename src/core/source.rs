//! Where rate tables come from.

use anyhow::Result;
use async_trait::async_trait;

/// Retrieves the published rate sheet as HTML text.
#[async_trait]
pub trait RateSheetProvider: Send + Sync {
    async fn fetch_html(&self) -> Result<String>;
}
