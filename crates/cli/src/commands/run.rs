use crate::runner::{self, TradeMode};
use anyhow::{bail, Result};
use capitol_trade_core::ConfigLoader;
use clap::Args;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

#[derive(Args)]
pub struct RunArgs {
    /// Trade with real money (also requires --arm)
    #[arg(long)]
    pub live: bool,
    /// Second confirmation flag for live trading
    #[arg(long)]
    pub arm: bool,
    /// Starting capital in whole dollars (paper mode)
    #[arg(long)]
    pub capital: Option<u64>,
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,
}

/// Starts the trading loop. Paper by default; live requires `--live --arm`,
/// both environment credentials, and a typed confirmation.
pub async fn run_bot(args: RunArgs) -> Result<()> {
    let mut config = ConfigLoader::load_from(&args.config)?;
    if let Some(capital) = args.capital {
        config.trading.initial_capital = Decimal::from(capital);
    }

    let mode = if args.live {
        if !args.arm {
            bail!("live mode requires BOTH --live and --arm");
        }
        confirm_live()?;
        TradeMode::Live
    } else {
        println!(
            "\nStarting PAPER mode | capital: ${}\n",
            config.trading.initial_capital
        );
        TradeMode::Paper
    };

    runner::run_loop(config, mode).await
}

fn confirm_live() -> Result<()> {
    println!();
    println!("{}", "=".repeat(60));
    println!("  LIVE TRADING - REAL MONEY AT RISK");
    println!("  Type ARM to continue:");
    print!("  > ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    if line.trim() != "ARM" {
        bail!("live trading not confirmed");
    }
    Ok(())
}
