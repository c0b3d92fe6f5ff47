//! The orchestrator: wires the feed, scoring engine, broker, and position
//! manager into a tick-driven loop.
//!
//! One initial pass scores the full lookback window, then each tick fetches
//! the latest disclosures, scores the unseen ones against the rolling
//! history, executes the top actionable signals, and reprices open
//! positions. A failed tick is logged and the loop continues after a
//! cooldown; Ctrl+C triggers a final portfolio report.

use anyhow::{Context, Result};
use capitol_trade_broker::{
    AlpacaClient, AlpacaCredentials, AlpacaExecutor, AlpacaPriceSource, PaperExecutor,
    StooqPriceSource,
};
use capitol_trade_core::{AppConfig, OrderExecutor, PriceSource, Trade, TradeFeed};
use capitol_trade_feed::StockWatcherFeed;
use capitol_trade_scoring::SignalEngine;
use capitol_trade_trader::{
    ExecutionOutcome, PositionManager, ReportFormatter, RiskParams, SignalJournal,
};
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

/// Days of disclosures each periodic tick looks back over.
const RECENT_DAYS: i64 = 2;

/// Seconds to wait after a failed tick before the loop resumes.
const TICK_COOLDOWN_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeMode {
    Paper,
    Live,
}

struct Bot {
    config: AppConfig,
    feed: StockWatcherFeed,
    engine: SignalEngine,
    journal: SignalJournal,
    prices: Box<dyn PriceSource>,
    executor: Box<dyn OrderExecutor>,
    manager: PositionManager,
    history: Vec<Trade>,
    seen_ids: HashSet<String>,
}

/// Builds the bot for the requested mode and runs it until interrupted.
///
/// # Errors
///
/// Returns an error on unrecoverable startup failures: bad configuration,
/// or missing credentials / unreachable brokerage in live mode.
pub async fn run_loop(config: AppConfig, mode: TradeMode) -> Result<()> {
    let (prices, executor, initial_capital): (
        Box<dyn PriceSource>,
        Box<dyn OrderExecutor>,
        Decimal,
    ) = match mode {
        TradeMode::Paper => (
            Box::new(StooqPriceSource::new(config.broker.quote_url.clone())?),
            Box::new(PaperExecutor::new()),
            config.trading.initial_capital,
        ),
        TradeMode::Live => {
            let credentials = AlpacaCredentials::from_env()?;
            let client = Arc::new(AlpacaClient::new(&config.broker, credentials)?);
            let equity = client
                .account_equity()
                .await
                .context("cannot reach brokerage account")?;
            tracing::info!(%equity, "connected to live brokerage");
            (
                Box::new(AlpacaPriceSource::new(client.clone())),
                Box::new(AlpacaExecutor::new(client)),
                equity,
            )
        }
    };

    let manager = PositionManager::new(initial_capital, RiskParams::from_config(&config.trading)?);
    let mut bot = Bot {
        feed: StockWatcherFeed::new(&config.feed)?,
        engine: SignalEngine::with_curated_tables(config.scoring.cluster_window_days),
        journal: SignalJournal::new(&config.log_dir)?,
        prices,
        executor,
        manager,
        history: Vec::new(),
        seen_ids: HashSet::new(),
        config,
    };

    tracing::info!(
        mode = ?mode,
        capital = %initial_capital,
        interval_secs = bot.config.check_interval_secs,
        "trading loop starting"
    );

    // Initial pass over the full lookback window.
    let lookback = bot.config.feed.days_lookback;
    match bot.feed.fetch_all(lookback).await {
        Ok(initial) => {
            tracing::info!(trades = initial.len(), lookback, "initial history loaded");
            bot.absorb(&initial);
            if let Err(err) = bot.process_batch(&initial, true).await {
                tracing::error!(error = %err, "initial scoring pass failed");
            }
            bot.refresh_positions().await;
        }
        Err(err) => {
            tracing::error!(error = %err, "initial fetch failed, starting with empty history");
        }
    }

    let mut ticker =
        tokio::time::interval(Duration::from_secs(bot.config.check_interval_secs));
    ticker.tick().await; // the first tick fires immediately; the initial pass covered it

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(err) = bot.tick().await {
                    tracing::error!(error = %err, "tick failed, cooling down");
                    tokio::time::sleep(Duration::from_secs(TICK_COOLDOWN_SECS)).await;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("received Ctrl+C, shutting down");
                break;
            }
        }
    }

    bot.final_report().await;
    Ok(())
}

impl Bot {
    /// One periodic pass: fetch, score what is new, reprice positions.
    async fn tick(&mut self) -> Result<()> {
        tracing::info!("checking for new disclosures");
        let recent = self.feed.fetch_recent(RECENT_DAYS).await?;
        let fresh: Vec<Trade> = recent
            .into_iter()
            .filter(|t| !self.seen_ids.contains(&t.trade_id))
            .collect();

        if fresh.is_empty() {
            tracing::info!("no new disclosures");
        } else {
            tracing::info!(count = fresh.len(), "new disclosures found");
            self.absorb(&fresh);
            self.process_batch(&fresh, true).await?;
        }

        self.refresh_positions().await;
        Ok(())
    }

    /// Adds trades to the rolling history, keeping only the most recent
    /// `history_cap` entries.
    fn absorb(&mut self, trades: &[Trade]) {
        for trade in trades {
            if self.seen_ids.insert(trade.trade_id.clone()) {
                self.history.push(trade.clone());
            }
        }
        let cap = self.config.scoring.history_cap;
        if self.history.len() > cap {
            let excess = self.history.len() - cap;
            for dropped in self.history.drain(..excess) {
                self.seen_ids.remove(&dropped.trade_id);
            }
        }
    }

    /// Scores a batch against the rolling history and executes the top
    /// actionable signals.
    async fn process_batch(&mut self, batch: &[Trade], execute: bool) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let signals = self
            .engine
            .generate_signals(batch, &self.history, Utc::now().date_naive());
        self.journal.record_signals(&signals, Utc::now())?;

        for signal in signals.iter().take(10) {
            tracing::info!(
                "[{:10}] {:6} score={:.0}/100 | {}",
                signal.recommendation.as_str(),
                signal.trade.symbol,
                signal.total_score,
                signal.trade.politician
            );
        }

        if !execute {
            return Ok(());
        }

        let mut executed = 0usize;
        for signal in &signals {
            if executed >= self.config.trading.max_signals_per_run {
                break;
            }
            if !signal.recommendation.is_actionable() {
                continue;
            }
            match self
                .manager
                .execute_signal(signal, self.prices.as_ref(), self.executor.as_mut())
                .await?
            {
                ExecutionOutcome::Entered(position) => {
                    executed += 1;
                    self.journal.record_execution(signal, &position, Utc::now())?;
                }
                ExecutionOutcome::Rejected(_) => {}
            }
        }
        if executed == 0 {
            tracing::info!("no new positions opened this pass");
        }
        Ok(())
    }

    /// Fetches prices for the open book and applies stops and targets.
    async fn refresh_positions(&mut self) {
        if self.manager.open_positions().is_empty() {
            return;
        }

        let prices = self.current_prices().await;
        let closed = self.manager.update_positions(&prices);
        for (symbol, reason) in &closed {
            tracing::info!(symbol = %symbol, reason = reason.as_str(), "closed this tick");
        }

        let summary = self.manager.portfolio_summary(&prices);
        tracing::info!(
            equity = %summary.total_equity,
            open_pnl = %summary.open_pnl,
            closed_pnl = %summary.closed_pnl,
            positions = summary.open_positions,
            "portfolio update"
        );
    }

    /// Latest price per open symbol; symbols the source cannot price this
    /// tick are simply absent from the map.
    async fn current_prices(&self) -> HashMap<String, Decimal> {
        let symbols: Vec<String> = self.manager.open_positions().keys().cloned().collect();
        let mut prices = HashMap::new();
        for symbol in symbols {
            match self.prices.latest_price(&symbol).await {
                Ok(Some(price)) => {
                    prices.insert(symbol, price);
                }
                Ok(None) => {
                    tracing::debug!(symbol = %symbol, "no price this tick");
                }
                Err(err) => {
                    tracing::warn!(symbol = %symbol, error = %err, "price fetch failed");
                }
            }
        }
        prices
    }

    async fn final_report(&mut self) {
        let prices = self.current_prices().await;
        let summary = self.manager.portfolio_summary(&prices);
        println!("{}", ReportFormatter::format(&summary));
    }
}
