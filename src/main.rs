use anyhow::Result;
use clap::{Parser, Subcommand};
use toque_rates::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for toque_rates::AppCommand {
    fn from(cmd: Commands) -> toque_rates::AppCommand {
        match cmd {
            Commands::Once => toque_rates::AppCommand::Once,
            Commands::Watch => toque_rates::AppCommand::Watch,
            Commands::Show => toque_rates::AppCommand::Show,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Fetch the buy rates once and save them
    Once,
    /// Fetch the buy rates every interval until interrupted
    Watch,
    /// Display the saved buy rates
    Show,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => toque_rates::cli::setup::setup(),
        Some(cmd) => toque_rates::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            toque_rates::run_command(
                toque_rates::AppCommand::Interactive,
                cli.config_path.as_deref(),
            )
            .await
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
