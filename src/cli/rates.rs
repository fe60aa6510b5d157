use super::ui;
use crate::core::Snapshot;
use crate::scheduler::Scheduler;
use crate::updater::{RateUpdater, UpdateOutcome};
use anyhow::Result;
use comfy_table::Cell;
use tracing::warn;

impl Snapshot {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Currency"), ui::header_cell("Buy")]);

        for rate in &self.rates {
            table.add_row(vec![
                Cell::new(rate.currency.code()),
                ui::rate_cell(&rate.buy_rate),
            ]);
        }

        let mut output = format!(
            "Buy rates: {}\n\n",
            ui::style_text(&self.source, ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(
                &format!(
                    "Updated {} from {}",
                    self.updated_at.format("%Y-%m-%d %H:%M:%S"),
                    self.source_url
                ),
                ui::StyleType::Subtle
            )
        ));
        output
    }
}

fn print_outcome(result: &Result<UpdateOutcome>, updater: &RateUpdater) {
    match result {
        Ok(UpdateOutcome::Updated(snapshot)) => {
            println!("{}", snapshot.display_as_table());
            println!(
                "{} {}",
                ui::style_text("Saved to", ui::StyleType::Success),
                updater.writer().path().display()
            );
        }
        Ok(UpdateOutcome::NoData) => println!(
            "{}",
            ui::style_text("Could not obtain exchange rates", ui::StyleType::Error)
        ),
        Err(e) => println!(
            "{}",
            ui::style_text(&format!("Update failed: {e}"), ui::StyleType::Error)
        ),
    }
}

/// Refreshes the snapshot once.
pub async fn once(updater: &RateUpdater, scheduler: &Scheduler) -> Result<()> {
    let spinner = ui::new_spinner("Fetching exchange rates...");
    let result = scheduler.run_once(updater).await;
    spinner.finish_and_clear();

    print_outcome(&result, updater);
    result.map(|_| ())
}

/// Refreshes the snapshot on the scheduler's interval until Ctrl+C.
pub async fn watch(updater: &RateUpdater, scheduler: &Scheduler) -> Result<()> {
    println!(
        "{}",
        ui::style_text("Starting buy rate scheduler", ui::StyleType::Title)
    );
    println!(
        "{}",
        ui::style_text(
            &format!(
                "Rates refresh every {} seconds. Press Ctrl+C to stop.",
                scheduler.interval().as_secs()
            ),
            ui::StyleType::Subtle
        )
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Could not listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    let cycles = scheduler
        .run_until(updater, shutdown, |result| print_outcome(result, updater))
        .await;

    println!(
        "\n{}",
        ui::style_text(
            &format!("Scheduler stopped after {cycles} updates"),
            ui::StyleType::Subtle
        )
    );
    Ok(())
}
