//! Normalized congressional trade disclosures.
//!
//! A [`Trade`] is one disclosed transaction after the feed layer has cleaned
//! it up: symbol sanitized, amount bracket resolved, dates parsed, filing
//! delay computed. Trades are immutable once built.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Statutory disclosure deadline in days (STOCK Act).
pub const FILING_DEADLINE_DAYS: i64 = 45;

/// Delay past which a filing is treated as an aggravated red flag.
pub const SUSPICIOUS_DELAY_DAYS: i64 = 90;

/// Chamber of Congress the filer sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chamber {
    House,
    Senate,
}

impl Chamber {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Senate => "senate",
        }
    }
}

/// One disclosed securities transaction by a legislator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    /// Deterministic identity hash, see [`Trade::identity_hash`].
    pub trade_id: String,
    pub politician: String,
    pub chamber: Chamber,
    pub party: String,
    pub state: String,
    /// 1-5 uppercase alphabetic characters, enforced by the normalizer.
    pub symbol: String,
    pub asset_name: String,
    /// Free text, e.g. "Purchase", "Sale (Full)", "Exchange".
    pub trade_type: String,
    /// Lower bound of the disclosed amount bracket, whole dollars.
    pub amount_low: i64,
    /// Upper bound of the disclosed amount bracket, whole dollars.
    pub amount_high: i64,
    pub transaction_date: NaiveDate,
    pub disclosure_date: NaiveDate,
    /// Days between transaction and disclosure, clamped to >= 0.
    pub filing_delay_days: i64,
    /// True when the instrument or trade-type text indicates an option.
    pub is_option: bool,
    #[serde(default)]
    pub committee: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl Trade {
    /// Deterministic identity for a disclosure. Re-fetching the same filing
    /// yields the same id, which is what the feed dedups on.
    #[must_use]
    pub fn identity_hash(
        politician: &str,
        symbol: &str,
        date_str: &str,
        trade_type: &str,
    ) -> String {
        let mut hasher = Sha256::new();
        hasher.update(politician.as_bytes());
        hasher.update(symbol.as_bytes());
        hasher.update(date_str.as_bytes());
        hasher.update(trade_type.as_bytes());
        let digest = hasher.finalize();
        hex::encode(&digest[..6])
    }

    /// Midpoint of the disclosed bracket, floored.
    #[must_use]
    pub const fn avg_amount(&self) -> i64 {
        (self.amount_low + self.amount_high) / 2
    }

    /// Buy-side classification by substring match; everything else is
    /// treated as a sale/exchange and never produces a signal.
    #[must_use]
    pub fn is_purchase(&self) -> bool {
        self.trade_type.to_lowercase().contains("purchase")
    }

    /// Filed past the statutory 45-day deadline.
    #[must_use]
    pub const fn is_late(&self) -> bool {
        self.filing_delay_days > FILING_DEADLINE_DAYS
    }

    /// Filed more than 90 days after the transaction.
    #[must_use]
    pub const fn is_suspiciously_late(&self) -> bool {
        self.filing_delay_days > SUSPICIOUS_DELAY_DAYS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(trade_type: &str, delay: i64) -> Trade {
        Trade {
            trade_id: Trade::identity_hash("Jane Doe", "NVDA", "2025-06-01", trade_type),
            politician: "Jane Doe".to_string(),
            chamber: Chamber::House,
            party: "Independent".to_string(),
            state: "CA".to_string(),
            symbol: "NVDA".to_string(),
            asset_name: "NVIDIA Corporation".to_string(),
            trade_type: trade_type.to_string(),
            amount_low: 15_001,
            amount_high: 50_000,
            transaction_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            disclosure_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap() + chrono::Duration::days(delay),
            filing_delay_days: delay,
            is_option: false,
            committee: None,
            notes: String::new(),
        }
    }

    #[test]
    fn identity_hash_is_deterministic() {
        let a = Trade::identity_hash("Jane Doe", "NVDA", "2025-06-01", "Purchase");
        let b = Trade::identity_hash("Jane Doe", "NVDA", "2025-06-01", "Purchase");
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
    }

    #[test]
    fn identity_hash_differs_by_field() {
        let a = Trade::identity_hash("Jane Doe", "NVDA", "2025-06-01", "Purchase");
        let b = Trade::identity_hash("Jane Doe", "NVDA", "2025-06-01", "Sale (Full)");
        let c = Trade::identity_hash("Jane Doe", "AMD", "2025-06-01", "Purchase");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn avg_amount_is_floored_midpoint() {
        let t = trade("Purchase", 0);
        // (15001 + 50000) / 2 = 32500 (floor of 32500.5)
        assert_eq!(t.avg_amount(), 32_500);
    }

    #[test]
    fn purchase_classification_is_case_insensitive_substring() {
        assert!(trade("Purchase", 0).is_purchase());
        assert!(trade("purchase (partial)", 0).is_purchase());
        assert!(!trade("Sale (Full)", 0).is_purchase());
        assert!(!trade("Exchange", 0).is_purchase());
    }

    #[test]
    fn late_thresholds_are_exclusive_boundaries() {
        assert!(!trade("Purchase", 45).is_late());
        assert!(trade("Purchase", 46).is_late());
        assert!(!trade("Purchase", 90).is_suspiciously_late());
        assert!(trade("Purchase", 91).is_suspiciously_late());
    }

    #[test]
    fn chamber_serializes_lowercase() {
        let json = serde_json::to_string(&Chamber::House).unwrap();
        assert_eq!(json, "\"house\"");
        let back: Chamber = serde_json::from_str("\"senate\"").unwrap();
        assert_eq!(back, Chamber::Senate);
    }
}
