//! Paper order execution.
//!
//! Makes zero API calls; fills are assumed at the caller's reference price
//! and order ids are synthesized locally. It is impossible to reach a real
//! brokerage through this executor.

use anyhow::Result;
use async_trait::async_trait;
use capitol_trade_core::OrderExecutor;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct PaperExecutor;

impl PaperExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OrderExecutor for PaperExecutor {
    async fn submit_buy(&mut self, symbol: &str, shares: u64) -> Result<String> {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(8);
        tracing::debug!(symbol, shares, order_id = %id, "paper order filled");
        Ok(format!("paper-{id}"))
    }
}
