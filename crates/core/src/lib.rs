pub mod config;
pub mod config_loader;
pub mod signal;
pub mod trade;
pub mod traits;

pub use config::{AppConfig, BrokerConfig, FeedConfig, ScoringConfig, TradingConfig};
pub use config_loader::ConfigLoader;
pub use signal::{
    tier_for_score, PositionSize, Recommendation, TradeSignal, Urgency, MIN_SCORE_FOR_SIGNAL,
};
pub use trade::{Chamber, Trade};
pub use traits::{OrderExecutor, PriceSource, TradeFeed};
