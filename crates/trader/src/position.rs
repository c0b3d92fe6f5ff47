//! Position lifecycle and risk rules.
//!
//! Per symbol the state machine is absent -> open -> closed; a symbol may
//! reopen later but never holds two positions at once. While a position is
//! open its stop-loss only ever ratchets upward.

use anyhow::Result;
use capitol_trade_core::{OrderExecutor, PriceSource, TradeSignal, TradingConfig};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// One simulated or live holding.
#[derive(Debug, Clone, Serialize)]
pub struct Position {
    pub symbol: String,
    pub shares: u64,
    pub entry_price: Decimal,
    /// Monotonically non-decreasing while the position is open.
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    pub politician: String,
    pub signal_score: f64,
    pub order_id: String,
    pub opened_at: DateTime<Utc>,
    /// Realized P&L, set once on close.
    pub pnl: Decimal,
    pub is_open: bool,
}

/// Why a position left the open set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
}

impl ExitReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StopLoss => "stop_loss",
            Self::TakeProfit => "take_profit",
        }
    }
}

/// Why a signal produced no trade. These are ordinary outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionRejection {
    /// The open-position cap is already reached.
    PositionLimitReached,
    /// The symbol already has an open position.
    AlreadyHolding,
    /// No usable price from the price source this tick.
    PriceUnavailable,
    /// The 10%-of-equity notional cap rounds to zero shares.
    NotionalCapZero,
    /// The sized order costs more than remaining cash.
    InsufficientCash,
}

impl ExecutionRejection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PositionLimitReached => "position limit reached",
            Self::AlreadyHolding => "already holding symbol",
            Self::PriceUnavailable => "price unavailable",
            Self::NotionalCapZero => "notional cap rounds to zero shares",
            Self::InsufficientCash => "insufficient cash",
        }
    }
}

/// Outcome of [`PositionManager::execute_signal`].
#[derive(Debug)]
pub enum ExecutionOutcome {
    Entered(Position),
    Rejected(ExecutionRejection),
}

/// Risk rules as exact decimals.
#[derive(Debug, Clone)]
pub struct RiskParams {
    pub max_positions: usize,
    pub risk_per_trade: Decimal,
    pub stop_loss_pct: Decimal,
    pub take_profit_pct: Decimal,
    pub trailing_stop_pct: Decimal,
    pub max_notional_pct: Decimal,
}

impl RiskParams {
    /// # Errors
    ///
    /// Returns an error if any configured fraction cannot be represented as
    /// a decimal.
    pub fn from_config(config: &TradingConfig) -> Result<Self> {
        Ok(Self {
            max_positions: config.max_positions,
            risk_per_trade: Decimal::try_from(config.risk_per_trade_pct)?,
            stop_loss_pct: Decimal::try_from(config.stop_loss_pct)?,
            take_profit_pct: Decimal::try_from(config.take_profit_pct)?,
            trailing_stop_pct: Decimal::try_from(config.trailing_stop_pct)?,
            max_notional_pct: Decimal::try_from(config.max_equity_pct_per_position)?,
        })
    }
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            max_positions: 5,
            risk_per_trade: Decimal::new(2, 2),      // 0.02
            stop_loss_pct: Decimal::new(8, 2),       // 0.08
            take_profit_pct: Decimal::new(20, 2),    // 0.20
            trailing_stop_pct: Decimal::new(12, 2),  // 0.12
            max_notional_pct: Decimal::new(10, 2),   // 0.10
        }
    }
}

/// Read-only portfolio snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub total_equity: Decimal,
    pub cash: Decimal,
    pub open_positions: usize,
    pub open_pnl: Decimal,
    pub closed_pnl: Decimal,
    pub win_rate: f64,
    pub total_trades: usize,
}

/// Owns the open-position set, the closed history, and the cash balance.
///
/// Cash is deducted on entry and credited on close in every mode; the only
/// live/paper difference lives behind the [`OrderExecutor`] capability.
pub struct PositionManager {
    params: RiskParams,
    cash: Decimal,
    open: HashMap<String, Position>,
    closed: Vec<Position>,
}

impl PositionManager {
    #[must_use]
    pub fn new(initial_capital: Decimal, params: RiskParams) -> Self {
        Self {
            params,
            cash: initial_capital,
            open: HashMap::new(),
            closed: Vec::new(),
        }
    }

    #[must_use]
    pub const fn cash(&self) -> Decimal {
        self.cash
    }

    #[must_use]
    pub const fn open_positions(&self) -> &HashMap<String, Position> {
        &self.open
    }

    #[must_use]
    pub fn closed_positions(&self) -> &[Position] {
        &self.closed
    }

    /// Sizes and opens a position for one signal.
    ///
    /// Preconditions are checked in order and each failure is a distinct
    /// [`ExecutionRejection`], logged and returned; none of them is an error.
    /// Sizing: `risk = cash x risk_per_trade x size multiplier`, shares =
    /// `floor(risk / (price - stop))` with a minimum of 1, then capped so the
    /// position notional never exceeds 10% of equity.
    ///
    /// # Errors
    ///
    /// Returns an error only when the order executor fails to place an
    /// accepted order.
    pub async fn execute_signal(
        &mut self,
        signal: &TradeSignal,
        prices: &dyn PriceSource,
        executor: &mut dyn OrderExecutor,
    ) -> Result<ExecutionOutcome> {
        let symbol = &signal.trade.symbol;

        if self.open.len() >= self.params.max_positions {
            tracing::warn!(
                symbol = %symbol,
                max = self.params.max_positions,
                "rejected: position limit reached"
            );
            return Ok(ExecutionOutcome::Rejected(
                ExecutionRejection::PositionLimitReached,
            ));
        }

        if self.open.contains_key(symbol) {
            tracing::info!(symbol = %symbol, "rejected: already holding");
            return Ok(ExecutionOutcome::Rejected(ExecutionRejection::AlreadyHolding));
        }

        let price = match prices.latest_price(symbol).await {
            Ok(Some(price)) if price > Decimal::ZERO => price,
            Ok(_) => {
                tracing::warn!(symbol = %symbol, "rejected: no usable price");
                return Ok(ExecutionOutcome::Rejected(
                    ExecutionRejection::PriceUnavailable,
                ));
            }
            Err(err) => {
                tracing::warn!(symbol = %symbol, error = %err, "rejected: price fetch failed");
                return Ok(ExecutionOutcome::Rejected(
                    ExecutionRejection::PriceUnavailable,
                ));
            }
        };

        let multiplier = Decimal::try_from(signal.suggested_size.multiplier())?;
        let risk_dollars = self.cash * self.params.risk_per_trade * multiplier;
        let stop_loss = (price * (Decimal::ONE - self.params.stop_loss_pct)).round_dp(4);
        let take_profit = (price * (Decimal::ONE + self.params.take_profit_pct)).round_dp(4);
        let per_share_risk = price - stop_loss;

        let risk_shares = (risk_dollars / per_share_risk)
            .floor()
            .to_u64()
            .unwrap_or(0)
            .max(1);
        let cap_shares = (self.cash * self.params.max_notional_pct / price)
            .floor()
            .to_u64()
            .unwrap_or(0);
        if cap_shares == 0 {
            tracing::warn!(symbol = %symbol, %price, "rejected: notional cap rounds to zero");
            return Ok(ExecutionOutcome::Rejected(ExecutionRejection::NotionalCapZero));
        }
        let shares = risk_shares.min(cap_shares);

        let cost = price * Decimal::from(shares);
        if cost > self.cash {
            tracing::warn!(symbol = %symbol, %cost, cash = %self.cash, "rejected: insufficient cash");
            return Ok(ExecutionOutcome::Rejected(ExecutionRejection::InsufficientCash));
        }

        let order_id = executor.submit_buy(symbol, shares).await?;
        self.cash -= cost;

        let position = Position {
            symbol: symbol.clone(),
            shares,
            entry_price: price,
            stop_loss,
            take_profit,
            politician: signal.trade.politician.clone(),
            signal_score: signal.total_score,
            order_id,
            opened_at: Utc::now(),
            pnl: Decimal::ZERO,
            is_open: true,
        };
        tracing::info!(
            symbol = %symbol,
            shares,
            entry = %price,
            stop = %stop_loss,
            target = %take_profit,
            score = signal.total_score,
            "position opened"
        );
        self.open.insert(symbol.clone(), position.clone());
        Ok(ExecutionOutcome::Entered(position))
    }

    /// One pricing tick over all open positions.
    ///
    /// Ratchets trailing stops upward, then checks exits in order: stop-loss
    /// first, take-profit second. Positions without a supplied price are left
    /// untouched. Returns the symbols closed this tick.
    pub fn update_positions(
        &mut self,
        current_prices: &HashMap<String, Decimal>,
    ) -> Vec<(String, ExitReason)> {
        let mut exiting = Vec::new();

        for (symbol, position) in &mut self.open {
            let Some(&price) = current_prices.get(symbol) else {
                continue;
            };

            let candidate = (price * (Decimal::ONE - self.params.trailing_stop_pct)).round_dp(4);
            if candidate > position.stop_loss {
                position.stop_loss = candidate;
            }

            if price <= position.stop_loss {
                exiting.push((symbol.clone(), price, ExitReason::StopLoss));
            } else if price >= position.take_profit {
                exiting.push((symbol.clone(), price, ExitReason::TakeProfit));
            }
        }

        let mut closed = Vec::new();
        for (symbol, price, reason) in exiting {
            let Some(mut position) = self.open.remove(&symbol) else {
                continue;
            };
            position.pnl = (price - position.entry_price) * Decimal::from(position.shares);
            position.is_open = false;
            self.cash += price * Decimal::from(position.shares);
            tracing::info!(
                symbol = %symbol,
                reason = reason.as_str(),
                pnl = %position.pnl,
                "position closed"
            );
            self.closed.push(position);
            closed.push((symbol, reason));
        }
        closed
    }

    /// Read-only snapshot; open positions without a current price fall back
    /// to their entry price.
    #[must_use]
    pub fn portfolio_summary(&self, current_prices: &HashMap<String, Decimal>) -> PortfolioSummary {
        let mut open_value = Decimal::ZERO;
        let mut open_pnl = Decimal::ZERO;
        for (symbol, position) in &self.open {
            let price = current_prices
                .get(symbol)
                .copied()
                .unwrap_or(position.entry_price);
            let shares = Decimal::from(position.shares);
            open_value += price * shares;
            open_pnl += (price - position.entry_price) * shares;
        }

        let closed_pnl: Decimal = self.closed.iter().map(|p| p.pnl).sum();
        let wins = self.closed.iter().filter(|p| p.pnl > Decimal::ZERO).count();
        let win_rate = wins as f64 / self.closed.len().max(1) as f64;

        PortfolioSummary {
            total_equity: self.cash + open_value,
            cash: self.cash,
            open_positions: self.open.len(),
            open_pnl,
            closed_pnl,
            win_rate,
            total_trades: self.closed.len(),
        }
    }
}
