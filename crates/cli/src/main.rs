use clap::{Parser, Subcommand};

mod commands;
mod runner;

use commands::{RunArgs, ScanArgs, StatusArgs, TopArgs};

#[derive(Parser)]
#[command(name = "capitol-trade")]
#[command(about = "Congressional disclosure signal engine and paper trader", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch disclosures, score them, and print ranked signals
    Scan(ScanArgs),
    /// Rank the curated politician profiles by historical alpha
    Top(TopArgs),
    /// Run the trading loop (paper unless --live --arm)
    Run(RunArgs),
    /// Show the most recent persisted signals
    Status(StatusArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan(args) => commands::run_scan(args).await?,
        Commands::Top(args) => commands::run_top(&args),
        Commands::Run(args) => commands::run_bot(args).await?,
        Commands::Status(args) => commands::run_status(&args)?,
    }

    Ok(())
}
