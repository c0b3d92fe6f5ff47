//! Live brokerage connectivity (Alpaca REST).
//!
//! Credentials come from the environment, never from configuration files.
//! The client exposes exactly what the trading loop needs: account equity at
//! connect, latest trade prices, and market buy orders.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use capitol_trade_core::{BrokerConfig, OrderExecutor, PriceSource};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const KEY_HEADER: &str = "APCA-API-KEY-ID";
const SECRET_HEADER: &str = "APCA-API-SECRET-KEY";

/// The two environment-supplied secrets required for live trading.
#[derive(Clone)]
pub struct AlpacaCredentials {
    pub api_key: String,
    pub secret_key: String,
}

impl AlpacaCredentials {
    /// Reads `ALPACA_API_KEY` and `ALPACA_SECRET_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error when either variable is missing or empty; live mode
    /// treats that as fatal at startup.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ALPACA_API_KEY").unwrap_or_default();
        let secret_key = std::env::var("ALPACA_SECRET_KEY").unwrap_or_default();
        if api_key.is_empty() || secret_key.is_empty() {
            bail!("live mode requires ALPACA_API_KEY and ALPACA_SECRET_KEY");
        }
        Ok(Self {
            api_key,
            secret_key,
        })
    }
}

#[derive(Deserialize)]
struct Account {
    equity: String,
}

#[derive(Deserialize)]
struct LatestTrade {
    trade: TradeTick,
}

#[derive(Deserialize)]
struct TradeTick {
    p: f64,
}

#[derive(Deserialize)]
struct OrderResponse {
    id: String,
}

pub struct AlpacaClient {
    http: reqwest::Client,
    trading_url: String,
    data_url: String,
    credentials: AlpacaCredentials,
}

impl AlpacaClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &BrokerConfig, credentials: AlpacaCredentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("building brokerage client")?;
        Ok(Self {
            http,
            trading_url: config.api_url.clone(),
            data_url: config.data_url.clone(),
            credentials,
        })
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header(KEY_HEADER, &self.credentials.api_key)
            .header(SECRET_HEADER, &self.credentials.secret_key)
    }

    /// Current account equity.
    ///
    /// # Errors
    ///
    /// Returns an error if the account endpoint is unreachable or the
    /// response cannot be parsed; callers treat this as fatal at startup.
    pub async fn account_equity(&self) -> Result<Decimal> {
        let url = format!("{}/v2/account", self.trading_url);
        let account: Account = self
            .authed(self.http.get(&url))
            .send()
            .await
            .context("account request")?
            .error_for_status()
            .context("account status")?
            .json()
            .await
            .context("account body")?;
        account
            .equity
            .parse()
            .context("unparseable account equity")
    }

    async fn latest_trade_price(&self, symbol: &str) -> Result<Option<Decimal>> {
        let url = format!("{}/v2/stocks/{symbol}/trades/latest", self.data_url);
        let response = self
            .authed(self.http.get(&url))
            .send()
            .await
            .with_context(|| format!("latest trade request for {symbol}"))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let latest: LatestTrade = response
            .error_for_status()
            .with_context(|| format!("latest trade status for {symbol}"))?
            .json()
            .await
            .with_context(|| format!("latest trade body for {symbol}"))?;

        Ok(Decimal::try_from(latest.trade.p).ok().filter(|p| *p > Decimal::ZERO))
    }

    async fn submit_market_buy(&self, symbol: &str, shares: u64) -> Result<String> {
        let url = format!("{}/v2/orders", self.trading_url);
        let body = serde_json::json!({
            "symbol": symbol,
            "qty": shares.to_string(),
            "side": "buy",
            "type": "market",
            "time_in_force": "day",
        });
        let order: OrderResponse = self
            .authed(self.http.post(&url))
            .json(&body)
            .send()
            .await
            .with_context(|| format!("order request for {symbol}"))?
            .error_for_status()
            .with_context(|| format!("order rejected for {symbol}"))?
            .json()
            .await
            .with_context(|| format!("order body for {symbol}"))?;
        Ok(order.id)
    }
}

/// Live [`PriceSource`] backed by the brokerage data API.
pub struct AlpacaPriceSource {
    client: Arc<AlpacaClient>,
}

impl AlpacaPriceSource {
    #[must_use]
    pub fn new(client: Arc<AlpacaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PriceSource for AlpacaPriceSource {
    async fn latest_price(&self, symbol: &str) -> Result<Option<Decimal>> {
        self.client.latest_trade_price(symbol).await
    }
}

/// Live [`OrderExecutor`] submitting real market orders.
pub struct AlpacaExecutor {
    client: Arc<AlpacaClient>,
}

impl AlpacaExecutor {
    #[must_use]
    pub fn new(client: Arc<AlpacaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderExecutor for AlpacaExecutor {
    async fn submit_buy(&mut self, symbol: &str, shares: u64) -> Result<String> {
        let order_id = self.client.submit_market_buy(symbol, shares).await?;
        tracing::info!(symbol, shares, order_id = %order_id, "live order submitted");
        Ok(order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_are_an_error() {
        // Only meaningful when the variables are absent from the test
        // environment, which is the normal case in CI.
        if std::env::var("ALPACA_API_KEY").is_err() {
            assert!(AlpacaCredentials::from_env().is_err());
        }
    }

    #[test]
    fn account_equity_parses_decimal_strings() {
        let account: Account = serde_json::from_str(r#"{"equity": "100432.50"}"#).unwrap();
        let equity: Decimal = account.equity.parse().unwrap();
        assert_eq!(equity, Decimal::new(10_043_250, 2));
    }

    #[test]
    fn latest_trade_deserializes() {
        let latest: LatestTrade =
            serde_json::from_str(r#"{"symbol": "NVDA", "trade": {"p": 181.63, "s": 100}}"#)
                .unwrap();
        assert!((latest.trade.p - 181.63).abs() < f64::EPSILON);
    }
}
