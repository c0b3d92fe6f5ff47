//! Per-trade suspicion scoring.

use crate::tables::CommitteeSectorMap;
use capitol_trade_core::Trade;

/// Ceiling for the trade sub-score.
pub const MAX_TRADE_SCORE: f64 = 40.0;

/// Scores a single trade's attributes: size, instrument, filing delay, and
/// committee overlap. Sales score exactly zero and are filtered out again by
/// the engine.
pub struct TradeScorer {
    committees: CommitteeSectorMap,
}

impl TradeScorer {
    #[must_use]
    pub fn new(committees: CommitteeSectorMap) -> Self {
        Self { committees }
    }

    /// Returns a score in [0, [`MAX_TRADE_SCORE`]] and the reasons behind it.
    #[must_use]
    pub fn score(&self, trade: &Trade) -> (f64, Vec<String>) {
        if !trade.is_purchase() {
            return (
                0.0,
                vec!["sale or exchange, excluded from buy-signal scoring".to_string()],
            );
        }

        let mut pts: f64 = 0.0;
        let mut reasons = Vec::new();

        // Size tiers are mutually exclusive, highest threshold wins.
        let amount = trade.avg_amount();
        if amount >= 1_000_000 {
            pts += 15.0;
            reasons.push(format!("mega trade: ${amount}"));
        } else if amount >= 250_000 {
            pts += 10.0;
            reasons.push(format!("large trade: ${amount}"));
        } else if amount >= 50_000 {
            pts += 5.0;
            reasons.push(format!("medium trade: ${amount}"));
        } else {
            pts += 2.0;
            reasons.push(format!("small trade: ${amount}"));
        }

        if trade.is_option {
            pts += 8.0;
            reasons.push("option position, high conviction".to_string());
        }

        if trade.is_suspiciously_late() {
            pts += 7.0;
            reasons.push(format!(
                "{} days late, well past the reporting deadline",
                trade.filing_delay_days
            ));
        } else if trade.is_late() {
            pts += 4.0;
            reasons.push(format!("late filing: {} days", trade.filing_delay_days));
        }

        if let Some(committee) = &trade.committee {
            if self.committees.covers(committee, &trade.symbol) {
                pts += 10.0;
                reasons.push(format!("traded inside own committee sector ({committee})"));
            }
        }

        (pts.min(MAX_TRADE_SCORE), reasons)
    }
}
