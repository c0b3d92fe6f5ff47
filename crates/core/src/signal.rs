//! Scored buy recommendations derived from disclosed trades.

use crate::trade::Trade;
use serde::{Deserialize, Serialize};

/// Totals below this never become a signal.
pub const MIN_SCORE_FOR_SIGNAL: f64 = 40.0;

/// Recommendation tier, assigned from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Watch,
}

impl Recommendation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StrongBuy => "STRONG BUY",
            Self::Buy => "BUY",
            Self::Watch => "WATCH",
        }
    }

    /// Only these tiers are ever handed to the position manager.
    #[must_use]
    pub const fn is_actionable(self) -> bool {
        matches!(self, Self::StrongBuy | Self::Buy)
    }
}

/// How quickly the signal should be acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    Immediate,
    Today,
    ThisWeek,
}

impl Urgency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Immediate => "IMMEDIATE",
            Self::Today => "TODAY",
            Self::ThisWeek => "THIS_WEEK",
        }
    }
}

/// Suggested sizing relative to the standard per-trade risk budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSize {
    Full,
    Half,
    Quarter,
}

impl PositionSize {
    /// Multiplier applied to the per-trade risk budget.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Full => 1.0,
            Self::Half => 0.5,
            Self::Quarter => 0.25,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "FULL",
            Self::Half => "HALF",
            Self::Quarter => "QUARTER",
        }
    }
}

/// Maps a total score to its tier, evaluated high to low.
///
/// Returns `None` below [`MIN_SCORE_FOR_SIGNAL`], in which case no signal is
/// emitted at all.
#[must_use]
pub fn tier_for_score(total: f64) -> Option<(Recommendation, Urgency, PositionSize)> {
    if total >= 80.0 {
        Some((Recommendation::StrongBuy, Urgency::Immediate, PositionSize::Full))
    } else if total >= 65.0 {
        Some((Recommendation::Buy, Urgency::Today, PositionSize::Half))
    } else if total >= MIN_SCORE_FOR_SIGNAL {
        Some((Recommendation::Watch, Urgency::ThisWeek, PositionSize::Quarter))
    } else {
        None
    }
}

/// A scored recommendation for one disclosed trade.
///
/// `total_score` is always the exact sum of the three sub-scores, each capped
/// independently before summing (politician <= 40, trade <= 40, cluster <= 20).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeSignal {
    pub trade: Trade,
    pub total_score: f64,
    pub politician_score: f64,
    pub trade_score: f64,
    pub cluster_score: f64,
    pub recommendation: Recommendation,
    pub urgency: Urgency,
    pub suggested_size: PositionSize,
    /// Human-readable scoring rationale, in scoring order.
    pub reasons: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_exact() {
        assert_eq!(
            tier_for_score(80.0).map(|(r, _, _)| r),
            Some(Recommendation::StrongBuy)
        );
        assert_eq!(
            tier_for_score(79.99).map(|(r, _, _)| r),
            Some(Recommendation::Buy)
        );
        assert_eq!(
            tier_for_score(65.0).map(|(r, _, _)| r),
            Some(Recommendation::Buy)
        );
        assert_eq!(
            tier_for_score(64.99).map(|(r, _, _)| r),
            Some(Recommendation::Watch)
        );
        assert_eq!(
            tier_for_score(40.0).map(|(r, _, _)| r),
            Some(Recommendation::Watch)
        );
        assert!(tier_for_score(39.99).is_none());
    }

    #[test]
    fn tiers_carry_urgency_and_size() {
        let (_, urgency, size) = tier_for_score(85.0).unwrap();
        assert_eq!(urgency, Urgency::Immediate);
        assert_eq!(size, PositionSize::Full);

        let (_, urgency, size) = tier_for_score(70.0).unwrap();
        assert_eq!(urgency, Urgency::Today);
        assert_eq!(size, PositionSize::Half);

        let (_, urgency, size) = tier_for_score(50.0).unwrap();
        assert_eq!(urgency, Urgency::ThisWeek);
        assert_eq!(size, PositionSize::Quarter);
    }

    #[test]
    fn only_buy_tiers_are_actionable() {
        assert!(Recommendation::StrongBuy.is_actionable());
        assert!(Recommendation::Buy.is_actionable());
        assert!(!Recommendation::Watch.is_actionable());
    }

    #[test]
    fn size_multipliers() {
        assert!((PositionSize::Full.multiplier() - 1.0).abs() < f64::EPSILON);
        assert!((PositionSize::Half.multiplier() - 0.5).abs() < f64::EPSILON);
        assert!((PositionSize::Quarter.multiplier() - 0.25).abs() < f64::EPSILON);
    }
}
