pub mod cluster;
pub mod engine;
pub mod politician_scorer;
pub mod tables;
pub mod trade_scorer;

pub use cluster::{Cluster, ClusterDetector, MAX_CLUSTER_SCORE};
pub use engine::SignalEngine;
pub use politician_scorer::{PoliticianScorer, MAX_POLITICIAN_SCORE};
pub use tables::{CommitteeSectorMap, PoliticianProfile, ProfileTable};
pub use trade_scorer::{TradeScorer, MAX_TRADE_SCORE};
