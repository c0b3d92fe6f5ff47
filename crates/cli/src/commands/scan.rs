use anyhow::Result;
use capitol_trade_core::{ConfigLoader, TradeFeed};
use capitol_trade_feed::StockWatcherFeed;
use capitol_trade_scoring::SignalEngine;
use chrono::Utc;
use clap::Args;

#[derive(Args)]
pub struct ScanArgs {
    /// Days of history to fetch
    #[arg(long, default_value_t = 30)]
    pub days: i64,
    /// Number of signals to print
    #[arg(long, default_value_t = 15)]
    pub top: usize,
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,
}

/// Fetches one window of disclosures, scores it against itself, and prints
/// the ranked signals. Never executes anything.
pub async fn run_scan(args: ScanArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)?;

    tracing::info!(days = args.days, "scanning congressional disclosures");
    let feed = StockWatcherFeed::new(&config.feed)?;
    let history = feed.fetch_all(args.days).await?;
    tracing::info!(trades = history.len(), "disclosures fetched");

    let engine = SignalEngine::with_curated_tables(config.scoring.cluster_window_days);
    let signals = engine.generate_signals(&history, &history, Utc::now().date_naive());

    if signals.is_empty() {
        println!("No signals found in the last {} days.", args.days);
        return Ok(());
    }

    println!("\n{}", "=".repeat(70));
    println!("  TOP SIGNALS ({} total)", signals.len());
    println!("{}", "=".repeat(70));

    for (rank, signal) in signals.iter().take(args.top).enumerate() {
        let trade = &signal.trade;
        println!(
            "\n{:2}. {:6} | score {:.0}/100 | {}",
            rank + 1,
            trade.symbol,
            signal.total_score,
            signal.recommendation.as_str()
        );
        println!(
            "    filer:   {} ({}, {})",
            trade.politician,
            trade.chamber.as_str(),
            trade.party
        );
        println!("    trade:   {} | ${}", trade.trade_type, trade.avg_amount());
        println!(
            "    dates:   {} -> disclosed {} ({} days)",
            trade.transaction_date, trade.disclosure_date, trade.filing_delay_days
        );
        if let Some(committee) = &trade.committee {
            println!("    committee: {committee}");
        }
        for reason in signal.reasons.iter().take(4) {
            println!("      - {reason}");
        }
        println!(
            "    act: {} | size {}",
            signal.urgency.as_str(),
            signal.suggested_size.as_str()
        );
    }

    println!("\n{}", "=".repeat(70));
    println!("  Note: the 45-day reporting deadline means the market may have");
    println!("  already moved on these filings. Paper trade first.");
    println!("{}\n", "=".repeat(70));

    Ok(())
}
