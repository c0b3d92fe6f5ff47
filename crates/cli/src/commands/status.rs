use anyhow::{Context, Result};
use capitol_trade_core::ConfigLoader;
use capitol_trade_trader::SignalJournal;
use clap::Args;

#[derive(Args)]
pub struct StatusArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,
}

/// Prints the most recent persisted signal file.
pub fn run_status(args: &StatusArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)?;
    let journal = SignalJournal::new(&config.log_dir)?;

    let Some(path) = journal.latest_signal_file()? else {
        println!("No signal files found. Run 'scan' or 'run' first.");
        return Ok(());
    };

    let body = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    let signals: Vec<serde_json::Value> = serde_json::from_str(&body)
        .with_context(|| format!("parsing {}", path.display()))?;

    println!("\nLatest signals ({}):", path.display());
    println!("{}", "=".repeat(60));
    for signal in signals.iter().take(10) {
        println!(
            "{:6} | {:>3.0}/100 | {:10} | {}",
            signal["symbol"].as_str().unwrap_or("?"),
            signal["score"].as_f64().unwrap_or(0.0),
            signal["recommendation"].as_str().unwrap_or("?"),
            signal["politician"].as_str().unwrap_or("?"),
        );
    }
    Ok(())
}
