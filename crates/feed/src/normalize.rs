//! Raw disclosure items to normalized [`Trade`] records.
//!
//! The two chambers publish slightly different field sets; this module maps
//! both into one shape, drops anything malformed, and derives the fields the
//! scorers depend on (bracket bounds, filing delay, option flag, committee).

use capitol_trade_core::{Chamber, Trade};
use chrono::NaiveDate;
use serde_json::Value;

/// Disclosed amount brackets, matched punctuation-insensitively.
const AMOUNT_RANGES: [(&str, (i64, i64)); 9] = [
    ("$1,001 - $15,000", (1_001, 15_000)),
    ("$15,001 - $50,000", (15_001, 50_000)),
    ("$50,001 - $100,000", (50_001, 100_000)),
    ("$100,001 - $250,000", (100_001, 250_000)),
    ("$250,001 - $500,000", (250_001, 500_000)),
    ("$500,001 - $1,000,000", (500_001, 1_000_000)),
    ("$1,000,001 - $5,000,000", (1_000_001, 5_000_000)),
    ("$5,000,001 - $25,000,000", (5_000_001, 25_000_000)),
    ("Over $25,000,000", (25_000_001, 50_000_000)),
];

/// Fallback bracket when the amount text matches nothing.
const DEFAULT_RANGE: (i64, i64) = (1_000, 15_000);

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// Curated committee memberships for the filers the profile table knows.
const KNOWN_COMMITTEES: [(&str, &str); 7] = [
    ("Nancy Pelosi", "Science, Space, and Technology"),
    ("Dan Crenshaw", "Armed Services"),
    ("Michael McCaul", "Foreign Affairs"),
    ("Josh Gottheimer", "Financial Services"),
    ("David Rouzer", "Agriculture"),
    ("Tommy Tuberville", "Armed Services"),
    ("Pat Toomey", "Banking"),
];

/// Resolves a disclosed amount string to its bracket bounds.
#[must_use]
pub fn parse_amount(raw: &str) -> (i64, i64) {
    let squash = |s: &str| s.replace([',', '$', ' '], "");
    let cleaned = squash(raw);

    for (bracket, bounds) in AMOUNT_RANGES {
        if cleaned.contains(&squash(bracket)) {
            return bounds;
        }
    }

    if let Ok(value) = cleaned.trim().parse::<i64>() {
        return (value, value);
    }
    DEFAULT_RANGE
}

/// Parses a disclosure date in any of the formats the dumps use.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Uppercases and validates a ticker: 1-5 alphabetic characters, nothing else.
#[must_use]
pub fn clean_symbol(raw: &str) -> Option<String> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() || symbol.len() > 5 {
        return None;
    }
    if !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(symbol)
}

/// Committee assignment for a known filer, by case-insensitive name match.
#[must_use]
pub fn known_committee(politician: &str) -> Option<String> {
    let lower = politician.to_lowercase();
    KNOWN_COMMITTEES
        .iter()
        .find(|(name, _)| lower.contains(&name.to_lowercase()))
        .map(|(_, committee)| (*committee).to_string())
}

fn text_field<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| item.get(*key).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
}

/// Converts one raw feed item into a [`Trade`], or `None` when the item is
/// malformed. Callers log drops at debug level; a bad record never aborts a
/// batch.
#[must_use]
pub fn normalize_item(item: &Value, chamber: Chamber) -> Option<Trade> {
    let symbol = clean_symbol(text_field(item, &["ticker"])?)?;

    let tx_raw = text_field(item, &["transaction_date", "transaction_date_str"])?;
    let disc_raw = text_field(item, &["disclosure_date", "filed_at_date"])?;
    let transaction_date = parse_date(tx_raw)?;
    let disclosure_date = parse_date(disc_raw)?;
    let filing_delay_days = (disclosure_date - transaction_date).num_days().max(0);

    let trade_type = text_field(item, &["type", "transaction_type"])?.trim().to_string();

    let (amount_low, amount_high) =
        parse_amount(text_field(item, &["amount", "asset_value_range"]).unwrap_or(""));

    let asset_type = text_field(item, &["asset_type"]).unwrap_or("").to_lowercase();
    let trade_type_lower = trade_type.to_lowercase();
    let is_option = asset_type.contains("option")
        || trade_type_lower.contains("call")
        || trade_type_lower.contains("put");

    let (politician, party, state) = match chamber {
        Chamber::House => {
            let name = text_field(item, &["representative"])?.trim().to_string();
            let party = text_field(item, &["party"]).unwrap_or("").to_string();
            let state = text_field(item, &["state"]).unwrap_or("").to_string();
            (name, party, state)
        }
        Chamber::Senate => {
            let first = text_field(item, &["first_name"]).unwrap_or("").trim().to_string();
            let last = text_field(item, &["last_name"]).unwrap_or("").trim().to_string();
            let name = format!("{first} {last}").trim().to_string();
            if name.is_empty() {
                return None;
            }
            let party = text_field(item, &["party"]).unwrap_or("").to_string();
            let state = text_field(item, &["senator_state", "state"])
                .unwrap_or("")
                .to_string();
            (name, party, state)
        }
    };
    if politician.is_empty() {
        return None;
    }

    let committee = known_committee(&politician);
    let asset_name = text_field(item, &["asset_description"])
        .unwrap_or(&symbol)
        .to_string();
    let notes = text_field(item, &["comment"]).unwrap_or("").to_string();

    Some(Trade {
        trade_id: Trade::identity_hash(&politician, &symbol, tx_raw, &trade_type),
        politician,
        chamber,
        party,
        state,
        symbol,
        asset_name,
        trade_type,
        amount_low,
        amount_high,
        transaction_date,
        disclosure_date,
        filing_delay_days,
        is_option,
        committee,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn amount_brackets_match_with_sloppy_punctuation() {
        assert_eq!(parse_amount("$1,001 - $15,000"), (1_001, 15_000));
        assert_eq!(parse_amount("$250,001-$500,000"), (250_001, 500_000));
        assert_eq!(parse_amount("1001 - 15000"), (1_001, 15_000));
        assert_eq!(parse_amount("Over $25,000,000"), (25_000_001, 50_000_000));
    }

    #[test]
    fn amount_falls_back_to_direct_integer_then_default() {
        assert_eq!(parse_amount("$75,000"), (75_000, 75_000));
        assert_eq!(parse_amount("not an amount"), (1_000, 15_000));
    }

    #[test]
    fn dates_parse_in_every_published_format() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        assert_eq!(parse_date("2025-06-05"), Some(expected));
        assert_eq!(parse_date("06/05/2025"), Some(expected));
        assert_eq!(parse_date("2025/06/05"), Some(expected));
        assert_eq!(parse_date(" 2025-06-05 "), Some(expected));
        assert!(parse_date("June 5th").is_none());
    }

    #[test]
    fn symbols_are_sanitized() {
        assert_eq!(clean_symbol(" nvda "), Some("NVDA".to_string()));
        assert_eq!(clean_symbol("BRKB"), Some("BRKB".to_string()));
        assert!(clean_symbol("").is_none());
        assert!(clean_symbol("TOOLONG").is_none());
        assert!(clean_symbol("BRK.B").is_none());
        assert!(clean_symbol("AB12").is_none());
        assert!(clean_symbol("N/A").is_none());
    }

    #[test]
    fn known_committee_matches_case_insensitively() {
        assert_eq!(
            known_committee("Hon. Nancy Pelosi"),
            Some("Science, Space, and Technology".to_string())
        );
        assert!(known_committee("Unknown Member").is_none());
    }

    fn house_item() -> Value {
        json!({
            "ticker": "NVDA",
            "transaction_date": "2025-05-01",
            "disclosure_date": "2025-06-20",
            "type": "Purchase",
            "amount": "$50,001 - $100,000",
            "representative": "Jane Doe",
            "party": "Independent",
            "state": "CA",
            "asset_description": "NVIDIA Corporation",
            "asset_type": "Stock"
        })
    }

    #[test]
    fn house_item_normalizes() {
        let trade = normalize_item(&house_item(), Chamber::House).unwrap();
        assert_eq!(trade.politician, "Jane Doe");
        assert_eq!(trade.symbol, "NVDA");
        assert_eq!(trade.amount_low, 50_001);
        assert_eq!(trade.filing_delay_days, 50);
        assert!(trade.is_late());
        assert!(!trade.is_option);
        assert_eq!(trade.chamber, Chamber::House);
    }

    #[test]
    fn senate_item_joins_first_and_last_name() {
        let item = json!({
            "ticker": "LMT",
            "transaction_date": "2025-05-01",
            "disclosure_date": "2025-05-10",
            "type": "Purchase",
            "amount": "$15,001 - $50,000",
            "first_name": "Tommy",
            "last_name": "Tuberville",
            "party": "Republican",
            "senator_state": "AL"
        });
        let trade = normalize_item(&item, Chamber::Senate).unwrap();
        assert_eq!(trade.politician, "Tommy Tuberville");
        assert_eq!(trade.state, "AL");
        assert_eq!(trade.committee, Some("Armed Services".to_string()));
    }

    #[test]
    fn option_detection_from_asset_type_and_trade_type() {
        let mut item = house_item();
        item["asset_type"] = json!("Stock Option");
        assert!(normalize_item(&item, Chamber::House).unwrap().is_option);

        let mut item = house_item();
        item["type"] = json!("purchase (call)");
        assert!(normalize_item(&item, Chamber::House).unwrap().is_option);
    }

    #[test]
    fn delay_clamps_to_zero_when_disclosure_precedes_transaction() {
        let mut item = house_item();
        item["disclosure_date"] = json!("2025-04-01");
        let trade = normalize_item(&item, Chamber::House).unwrap();
        assert_eq!(trade.filing_delay_days, 0);
    }

    #[test]
    fn malformed_items_are_dropped() {
        let mut missing_ticker = house_item();
        missing_ticker["ticker"] = json!("--2");
        assert!(normalize_item(&missing_ticker, Chamber::House).is_none());

        let mut bad_date = house_item();
        bad_date["transaction_date"] = json!("sometime");
        assert!(normalize_item(&bad_date, Chamber::House).is_none());

        let mut no_type = house_item();
        no_type["type"] = json!("");
        assert!(normalize_item(&no_type, Chamber::House).is_none());

        let mut no_name = house_item();
        no_name["representative"] = json!("");
        assert!(normalize_item(&no_name, Chamber::House).is_none());
    }

    #[test]
    fn identity_is_stable_across_refetches() {
        let a = normalize_item(&house_item(), Chamber::House).unwrap();
        let b = normalize_item(&house_item(), Chamber::House).unwrap();
        assert_eq!(a.trade_id, b.trade_id);
    }
}
