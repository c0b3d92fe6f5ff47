//! Correlated-buying detection.
//!
//! A cluster is a symbol purchased by two or more distinct legislators within
//! a rolling window. Correlated buying is the strongest proxy available for
//! shared non-public information, so it carries its own sub-score.

use capitol_trade_core::Trade;
use chrono::{Duration, NaiveDate};
use std::collections::{HashMap, HashSet};

/// Ceiling for the cluster sub-score.
pub const MAX_CLUSTER_SCORE: f64 = 20.0;

/// Points per distinct buyer before the cap.
const POINTS_PER_BUYER: f64 = 8.0;

/// Correlated buying in one symbol.
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Distinct politicians who bought within the window.
    pub buyer_count: usize,
    /// Buyer names in first-seen order.
    pub politicians: Vec<String>,
    /// Sum of averaged bracket amounts across all matching trades.
    pub total_amount: i64,
    /// `min(buyer_count * 8, 20)`.
    pub score: f64,
}

/// Scans trade history for symbols bought by multiple distinct legislators
/// within a rolling window anchored at an explicit date.
pub struct ClusterDetector {
    window_days: i64,
}

impl ClusterDetector {
    #[must_use]
    pub fn new(window_days: i64) -> Self {
        Self { window_days }
    }

    /// Builds the cluster map over the full history.
    ///
    /// Only purchase-type trades with a transaction date inside
    /// `[as_of - window, as_of]` participate; a symbol qualifies once two
    /// distinct politicians bought it.
    #[must_use]
    pub fn detect(&self, trades: &[Trade], as_of: NaiveDate) -> HashMap<String, Cluster> {
        let cutoff = as_of - Duration::days(self.window_days);

        let mut grouped: HashMap<&str, Vec<&Trade>> = HashMap::new();
        for trade in trades {
            if !trade.is_purchase() {
                continue;
            }
            if trade.transaction_date < cutoff || trade.transaction_date > as_of {
                continue;
            }
            grouped.entry(&trade.symbol).or_default().push(trade);
        }

        let mut clusters = HashMap::new();
        for (symbol, symbol_trades) in grouped {
            let mut seen = HashSet::new();
            let mut politicians = Vec::new();
            for trade in &symbol_trades {
                if seen.insert(trade.politician.as_str()) {
                    politicians.push(trade.politician.clone());
                }
            }
            if politicians.len() < 2 {
                continue;
            }

            let buyer_count = politicians.len();
            let total_amount = symbol_trades.iter().map(|t| t.avg_amount()).sum();
            clusters.insert(
                symbol.to_string(),
                Cluster {
                    buyer_count,
                    politicians,
                    total_amount,
                    score: (buyer_count as f64 * POINTS_PER_BUYER).min(MAX_CLUSTER_SCORE),
                },
            );
        }

        clusters
    }

    /// Cluster sub-score and reasons for one symbol, zero when the symbol is
    /// not clustered.
    #[must_use]
    pub fn score_for_symbol(
        &self,
        symbol: &str,
        clusters: &HashMap<String, Cluster>,
    ) -> (f64, Vec<String>) {
        let Some(cluster) = clusters.get(symbol) else {
            return (0.0, Vec::new());
        };

        let named: Vec<&str> = cluster
            .politicians
            .iter()
            .take(5)
            .map(String::as_str)
            .collect();
        let reasons = vec![
            format!(
                "cluster: {} politicians bought {symbol} within {} days",
                cluster.buyer_count, self.window_days
            ),
            format!("buyers: {}", named.join(", ")),
            format!("total invested: ${}", cluster.total_amount),
        ];
        (cluster.score, reasons)
    }
}
