//! Drives refresh cycles, once or on a fixed interval.

use crate::updater::{RateUpdater, UpdateOutcome};
use anyhow::Result;
use chrono::Local;
use std::future::Future;
use std::time::Duration;
use tracing::{error, info, warn};

pub struct Scheduler {
    interval: Duration,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs a single cycle and logs how it went.
    pub async fn run_once(&self, updater: &RateUpdater) -> Result<UpdateOutcome> {
        let result = updater.update().await;
        let at = Local::now().format("%H:%M:%S");
        match &result {
            Ok(UpdateOutcome::Updated(snapshot)) => {
                info!(rates = snapshot.rates.len(), "Scraping completed at {at}");
            }
            Ok(UpdateOutcome::NoData) => warn!("Scraping failed at {at}"),
            Err(e) => error!(error = %e, "Scraping cycle failed at {at}"),
        }
        result
    }

    /// Runs cycles back to back, waiting the interval after each one whether
    /// it succeeded or not, until `shutdown` resolves. Shutdown is only
    /// observed between cycles. Returns the number of cycles run.
    pub async fn run_until<F, R>(
        &self,
        updater: &RateUpdater,
        shutdown: F,
        mut report: R,
    ) -> usize
    where
        F: Future<Output = ()>,
        R: FnMut(&Result<UpdateOutcome>),
    {
        tokio::pin!(shutdown);
        let mut cycles = 0;

        loop {
            let result = self.run_once(updater).await;
            cycles += 1;
            report(&result);

            info!("Waiting {} seconds for the next update", self.interval.as_secs());
            tokio::select! {
                _ = &mut shutdown => {
                    info!(cycles, "Scheduler stopped");
                    return cycles;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}
