pub mod client;
pub mod error;
pub mod normalize;
pub mod stock_watcher;

pub use client::DisclosureClient;
pub use error::FeedError;
pub use stock_watcher::StockWatcherFeed;
