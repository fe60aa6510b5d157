use crate::core::PageSource;
use crate::core::config::SourceConfig;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tracing::debug;

/// Fetches the El Toque exchange rate page over HTTP.
pub struct ElToqueProvider {
    name: String,
    url: String,
    client: reqwest::Client,
}

impl ElToqueProvider {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            name: config.name.clone(),
            url: config.url.clone(),
            client,
        })
    }
}

#[async_trait]
impl PageSource for ElToqueProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_page(&self) -> Result<String> {
        debug!("Requesting rates page from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", self.url))?
            .error_for_status()
            .with_context(|| format!("Rates page returned an error status: {}", self.url))?;

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", self.url))?;

        if body.trim().is_empty() {
            return Err(anyhow!("Received empty page from {}", self.url));
        }

        debug!(bytes = body.len(), "Fetched rates page");
        Ok(body)
    }
}
