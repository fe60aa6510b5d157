//! A single refresh: fetch the page, extract the rates, replace the snapshot.

use crate::core::{PageSource, RateRecord, Snapshot};
use crate::extract::Extractor;
use crate::store::SnapshotWriter;
use anyhow::Result;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// A new snapshot was written.
    Updated(Snapshot),
    /// The page could not be fetched or held no rates; the snapshot is untouched.
    NoData,
}

pub struct RateUpdater {
    source: Box<dyn PageSource>,
    extractor: Extractor,
    writer: SnapshotWriter,
}

impl RateUpdater {
    pub fn new(source: Box<dyn PageSource>, extractor: Extractor, writer: SnapshotWriter) -> Self {
        Self {
            source,
            extractor,
            writer,
        }
    }

    pub fn writer(&self) -> &SnapshotWriter {
        &self.writer
    }

    /// Fetches and extracts. Transport failures are logged and reported as no
    /// rates.
    pub async fn scrape(&self) -> Vec<RateRecord> {
        info!(source = self.source.name(), "Connecting to rates page");
        let page = match self.source.fetch_page().await {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, "Failed to fetch rates page");
                return Vec::new();
            }
        };
        self.extractor.extract(&page)
    }

    pub async fn update(&self) -> Result<UpdateOutcome> {
        let rates = self.scrape().await;
        if rates.is_empty() {
            warn!("Could not obtain exchange rates");
            return Ok(UpdateOutcome::NoData);
        }

        let snapshot = Snapshot::new(self.source.name(), self.source.url(), rates);
        self.writer.write(&snapshot)?;
        info!(
            path = %self.writer.path().display(),
            rates = snapshot.rates.len(),
            "Buy rates updated"
        );
        Ok(UpdateOutcome::Updated(snapshot))
    }
}
