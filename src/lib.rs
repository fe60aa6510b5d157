pub mod cli;
pub mod core;
pub mod extract;
pub mod providers;
pub mod scheduler;
pub mod store;
pub mod updater;

use crate::cli::prompt::{RunMode, prompt_run_mode};
use crate::core::config::AppConfig;
use crate::extract::Extractor;
use crate::providers::ElToqueProvider;
use crate::scheduler::Scheduler;
use crate::store::SnapshotWriter;
use crate::updater::RateUpdater;
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Ask on stdin whether to run once or continuously
    Interactive,
    Once,
    Watch,
    Show,
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub fn build_updater(config: &AppConfig) -> Result<RateUpdater> {
    let source = ElToqueProvider::new(&config.source)?;
    let extractor = Extractor::with_default_strategies()?;
    let writer = SnapshotWriter::new(config.snapshot_path()?);
    Ok(RateUpdater::new(Box::new(source), extractor, writer))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Toque rates starting...");
    let config = load_config(config_path)?;

    let mode = match command {
        AppCommand::Show => {
            return cli::show::run(&SnapshotWriter::new(config.snapshot_path()?));
        }
        AppCommand::Once => RunMode::Once,
        AppCommand::Watch => RunMode::Watch,
        AppCommand::Interactive => {
            let stdin = std::io::stdin();
            prompt_run_mode(&mut stdin.lock(), &mut std::io::stdout(), config.interval())?
        }
    };

    let updater = build_updater(&config)?;
    let scheduler = Scheduler::new(config.interval());
    match mode {
        RunMode::Once => cli::rates::once(&updater, &scheduler).await,
        RunMode::Watch => cli::rates::watch(&updater, &scheduler).await,
    }
}
