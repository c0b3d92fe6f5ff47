use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Seconds between orchestrator ticks.
    pub check_interval_secs: u64,
    /// Directory for signal and execution journals.
    pub log_dir: String,
    pub trading: TradingConfig,
    pub feed: FeedConfig,
    pub scoring: ScoringConfig,
    pub broker: BrokerConfig,
}

/// Risk rules for the position manager. Fractions are of current equity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingConfig {
    pub initial_capital: Decimal,
    pub max_positions: usize,
    pub risk_per_trade_pct: f64,
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
    pub trailing_stop_pct: f64,
    /// No single position may exceed this fraction of equity notional.
    pub max_equity_pct_per_position: f64,
    /// At most this many new positions opened per scoring pass.
    pub max_signals_per_run: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub house_url: String,
    pub senate_url: String,
    /// Days of history fetched on the initial pass.
    pub days_lookback: i64,
    pub cache_ttl_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub cluster_window_days: i64,
    /// Rolling trade history keeps at most this many entries.
    pub history_cap: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    pub api_url: String,
    pub data_url: String,
    /// Quote endpoint used by the paper-mode price source.
    pub quote_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: 3600,
            log_dir: "logs".to_string(),
            trading: TradingConfig::default(),
            feed: FeedConfig::default(),
            scoring: ScoringConfig::default(),
            broker: BrokerConfig::default(),
        }
    }
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            initial_capital: Decimal::from(100_000),
            max_positions: 5,
            risk_per_trade_pct: 0.02,
            stop_loss_pct: 0.08,
            take_profit_pct: 0.20,
            trailing_stop_pct: 0.12,
            max_equity_pct_per_position: 0.10,
            max_signals_per_run: 3,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            house_url:
                "https://house-stock-watcher-data.s3-us-west-2.amazonaws.com/data/all_transactions.json"
                    .to_string(),
            senate_url:
                "https://senate-stock-watcher-data.s3-us-west-2.amazonaws.com/aggregate/all_transactions.json"
                    .to_string(),
            days_lookback: 30,
            cache_ttl_secs: 3600,
            request_timeout_secs: 15,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            cluster_window_days: 30,
            history_cap: 5000,
        }
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.alpaca.markets".to_string(),
            data_url: "https://data.alpaca.markets".to_string(),
            quote_url: "https://stooq.com".to_string(),
        }
    }
}
