//! Page retrieval abstraction

use anyhow::Result;
use async_trait::async_trait;

/// Something that can hand back the markup of the quoting page.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Human readable name recorded in the snapshot.
    fn name(&self) -> &str;

    /// URL recorded in the snapshot.
    fn url(&self) -> &str;

    async fn fetch_page(&self) -> Result<String>;
}
