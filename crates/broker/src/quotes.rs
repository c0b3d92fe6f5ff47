//! Free delayed-quote source used in paper mode.
//!
//! Stooq serves a one-row CSV per symbol; `N/D` in the close column means the
//! symbol is unknown or has no quote, which maps to `None` rather than an
//! error.

use anyhow::{Context, Result};
use async_trait::async_trait;
use capitol_trade_core::PriceSource;
use rust_decimal::Decimal;
use std::time::Duration;

pub struct StooqPriceSource {
    http: reqwest::Client,
    base_url: String,
}

impl StooqPriceSource {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("building quote client")?;
        Ok(Self { http, base_url })
    }

    fn quote_url(&self, symbol: &str) -> String {
        format!(
            "{}/q/l/?s={}.us&f=sd2t2ohlcv&h&e=csv",
            self.base_url,
            symbol.to_lowercase()
        )
    }

    fn parse_quote(body: &str) -> Option<Decimal> {
        let mut reader = csv::Reader::from_reader(body.as_bytes());
        let headers = reader.headers().ok()?.clone();
        let close_idx = headers.iter().position(|h| h == "Close")?;
        let record = reader.records().next()?.ok()?;
        let close = record.get(close_idx)?;
        let price: Decimal = close.trim().parse().ok()?;
        if price <= Decimal::ZERO {
            return None;
        }
        Some(price)
    }
}

#[async_trait]
impl PriceSource for StooqPriceSource {
    async fn latest_price(&self, symbol: &str) -> Result<Option<Decimal>> {
        let url = self.quote_url(symbol);
        let body = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("quote request for {symbol}"))?
            .error_for_status()
            .with_context(|| format!("quote status for {symbol}"))?
            .text()
            .await
            .with_context(|| format!("quote body for {symbol}"))?;
        Ok(Self::parse_quote(&body))
    }
}
