//! Capability traits at the seams of the system.
//!
//! The scoring engine and position manager only ever see these traits; the
//! simulated and live implementations live in the feed and broker crates.

use crate::trade::Trade;
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Supplies normalized, deduplicated disclosure records.
#[async_trait]
pub trait TradeFeed: Send + Sync {
    /// All trades with a transaction date within the last `days_back` days.
    async fn fetch_all(&self, days_back: i64) -> Result<Vec<Trade>>;

    /// Trades disclosed within the last `days` days.
    async fn fetch_recent(&self, days: i64) -> Result<Vec<Trade>>;
}

/// Supplies the most recent closing or traded price per symbol.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// `Ok(None)` means the source has no price for the symbol right now,
    /// which is distinct from an error reaching the source at all.
    async fn latest_price(&self, symbol: &str) -> Result<Option<Decimal>>;
}

/// Places buy orders. The paper variant synthesizes order ids locally.
#[async_trait]
pub trait OrderExecutor: Send + Sync {
    /// Submits a market buy and returns the broker's order id.
    async fn submit_buy(&mut self, symbol: &str, shares: u64) -> Result<String>;
}
