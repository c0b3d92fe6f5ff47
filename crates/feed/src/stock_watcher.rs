//! The stock-watcher disclosure feed.
//!
//! Pulls the full house and senate transaction dumps, normalizes them, and
//! serves range-filtered, deduplicated trade lists. Raw responses are cached
//! with a TTL so repeated passes within the hour do not refetch.

use crate::client::DisclosureClient;
use crate::error::FeedError;
use crate::normalize::normalize_item;
use anyhow::Result;
use async_trait::async_trait;
use capitol_trade_core::{Chamber, FeedConfig, Trade, TradeFeed};
use chrono::{Duration, Utc};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::time::{Duration as StdDuration, Instant};
use tokio::sync::Mutex;

struct CacheEntry {
    fetched_at: Instant,
    items: Vec<Value>,
}

/// [`TradeFeed`] backed by the two public stock-watcher dumps.
pub struct StockWatcherFeed {
    client: DisclosureClient,
    house_url: String,
    senate_url: String,
    cache_ttl: StdDuration,
    cache: Mutex<HashMap<Chamber, CacheEntry>>,
}

impl StockWatcherFeed {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = DisclosureClient::new(StdDuration::from_secs(config.request_timeout_secs))?;
        Ok(Self {
            client,
            house_url: config.house_url.clone(),
            senate_url: config.senate_url.clone(),
            cache_ttl: StdDuration::from_secs(config.cache_ttl_secs),
            cache: Mutex::new(HashMap::new()),
        })
    }

    fn url_for(&self, chamber: Chamber) -> &str {
        match chamber {
            Chamber::House => &self.house_url,
            Chamber::Senate => &self.senate_url,
        }
    }

    async fn chamber_items(&self, chamber: Chamber) -> Result<Vec<Value>, FeedError> {
        let mut cache = self.cache.lock().await;
        if let Some(entry) = cache.get(&chamber) {
            if entry.fetched_at.elapsed() < self.cache_ttl {
                return Ok(entry.items.clone());
            }
        }

        let items = self.client.fetch_items(self.url_for(chamber)).await?;
        cache.insert(
            chamber,
            CacheEntry {
                fetched_at: Instant::now(),
                items: items.clone(),
            },
        );
        Ok(items)
    }

    /// Fetches both chambers, tolerating one failing, and returns normalized
    /// trades with a transaction date on or after `cutoff`, deduplicated by
    /// identity hash.
    async fn fetch_window(&self, cutoff: chrono::NaiveDate) -> Vec<Trade> {
        let mut trades = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for chamber in [Chamber::House, Chamber::Senate] {
            let items = match self.chamber_items(chamber).await {
                Ok(items) => items,
                Err(err) => {
                    tracing::error!(chamber = chamber.as_str(), error = %err, "chamber fetch failed");
                    continue;
                }
            };

            let mut kept = 0usize;
            for item in &items {
                let Some(trade) = normalize_item(item, chamber) else {
                    tracing::debug!(chamber = chamber.as_str(), "dropped malformed item");
                    continue;
                };
                if trade.transaction_date < cutoff {
                    continue;
                }
                if !seen.insert(trade.trade_id.clone()) {
                    continue;
                }
                kept += 1;
                trades.push(trade);
            }
            tracing::info!(chamber = chamber.as_str(), kept, "chamber trades normalized");
        }

        trades
    }
}

#[async_trait]
impl TradeFeed for StockWatcherFeed {
    async fn fetch_all(&self, days_back: i64) -> Result<Vec<Trade>> {
        let cutoff = Utc::now().date_naive() - Duration::days(days_back);
        Ok(self.fetch_window(cutoff).await)
    }

    async fn fetch_recent(&self, days: i64) -> Result<Vec<Trade>> {
        // Disclosures lag transactions, so look back far enough that a
        // recently disclosed trade is in the window at all.
        let today = Utc::now().date_naive();
        let trades = self.fetch_window(today - Duration::days(days + 50)).await;
        Ok(trades
            .into_iter()
            .filter(|t| t.disclosure_date >= today - Duration::days(days))
            .collect())
    }
}
