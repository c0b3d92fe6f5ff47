//! On-disk journals for signals and executed orders.
//!
//! Each scoring pass writes one `signals_<stamp>.json` array; every executed
//! order appends one line to `executed_trades.jsonl`. Downstream status
//! reporting reads these files; the core never does.

use crate::position::Position;
use anyhow::{Context, Result};
use capitol_trade_core::TradeSignal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct SignalRecord<'a> {
    symbol: &'a str,
    politician: &'a str,
    score: f64,
    recommendation: &'static str,
    urgency: &'static str,
    transaction_date: String,
    disclosure_date: String,
    delay_days: i64,
    amount: i64,
    is_option: bool,
    committee: Option<&'a str>,
    reasons: &'a [String],
}

#[derive(Serialize)]
struct ExecutionRecord<'a> {
    timestamp: String,
    symbol: &'a str,
    politician: &'a str,
    score: f64,
    recommendation: &'static str,
    shares: u64,
    entry_price: String,
    stop_loss: String,
    take_profit: String,
    reasons: &'a [String],
}

pub struct SignalJournal {
    dir: PathBuf,
}

impl SignalJournal {
    /// # Errors
    ///
    /// Returns an error if the journal directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating journal directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes one pass's signals as a timestamped JSON array and returns the
    /// file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn record_signals(
        &self,
        signals: &[TradeSignal],
        at: DateTime<Utc>,
    ) -> Result<PathBuf> {
        let records: Vec<SignalRecord<'_>> = signals
            .iter()
            .map(|s| SignalRecord {
                symbol: &s.trade.symbol,
                politician: &s.trade.politician,
                score: s.total_score,
                recommendation: s.recommendation.as_str(),
                urgency: s.urgency.as_str(),
                transaction_date: s.trade.transaction_date.to_string(),
                disclosure_date: s.trade.disclosure_date.to_string(),
                delay_days: s.trade.filing_delay_days,
                amount: s.trade.avg_amount(),
                is_option: s.trade.is_option,
                committee: s.trade.committee.as_deref(),
                reasons: &s.reasons,
            })
            .collect();

        let path = self
            .dir
            .join(format!("signals_{}.json", at.format("%Y%m%d_%H%M")));
        let body = serde_json::to_string_pretty(&records)?;
        fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), count = signals.len(), "signals persisted");
        Ok(path)
    }

    /// Appends one executed order to `executed_trades.jsonl`.
    ///
    /// # Errors
    ///
    /// Returns an error if the line cannot be appended.
    pub fn record_execution(
        &self,
        signal: &TradeSignal,
        position: &Position,
        at: DateTime<Utc>,
    ) -> Result<()> {
        let record = ExecutionRecord {
            timestamp: at.to_rfc3339(),
            symbol: &position.symbol,
            politician: &signal.trade.politician,
            score: signal.total_score,
            recommendation: signal.recommendation.as_str(),
            shares: position.shares,
            entry_price: position.entry_price.to_string(),
            stop_loss: position.stop_loss.to_string(),
            take_profit: position.take_profit.to_string(),
            reasons: &signal.reasons,
        };

        let path = self.dir.join("executed_trades.jsonl");
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening {}", path.display()))?;
        writeln!(file, "{}", serde_json::to_string(&record)?)?;
        Ok(())
    }

    /// The most recent `signals_*.json` file, by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the journal directory cannot be read.
    pub fn latest_signal_file(&self) -> Result<Option<PathBuf>> {
        let mut candidates: Vec<PathBuf> = fs::read_dir(&self.dir)
            .with_context(|| format!("reading {}", self.dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("signals_") && n.ends_with(".json"))
            })
            .collect();
        candidates.sort();
        Ok(candidates.pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capitol_trade_core::{
        Chamber, PositionSize, Recommendation, Trade, Urgency,
    };
    use chrono::{NaiveDate, TimeZone};
    use rust_decimal_macros::dec;

    fn temp_journal(tag: &str) -> SignalJournal {
        let dir = std::env::temp_dir().join(format!(
            "capitol-trade-journal-{tag}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        SignalJournal::new(dir).unwrap()
    }

    fn sample_signal() -> TradeSignal {
        TradeSignal {
            trade: Trade {
                trade_id: "abc123".to_string(),
                politician: "Jane Doe".to_string(),
                chamber: Chamber::House,
                party: "Independent".to_string(),
                state: "CA".to_string(),
                symbol: "NVDA".to_string(),
                asset_name: "NVIDIA Corporation".to_string(),
                trade_type: "Purchase".to_string(),
                amount_low: 250_001,
                amount_high: 500_000,
                transaction_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                disclosure_date: NaiveDate::from_ymd_opt(2025, 7, 20).unwrap(),
                filing_delay_days: 49,
                is_option: false,
                committee: Some("Science, Space, and Technology".to_string()),
                notes: String::new(),
            },
            total_score: 72.5,
            politician_score: 32.2,
            trade_score: 24.3,
            cluster_score: 16.0,
            recommendation: Recommendation::Buy,
            urgency: Urgency::Today,
            suggested_size: PositionSize::Half,
            reasons: vec!["large trade: $375001".to_string()],
        }
    }

    fn sample_position() -> Position {
        Position {
            symbol: "NVDA".to_string(),
            shares: 40,
            entry_price: dec!(181.63),
            stop_loss: dec!(167.0996),
            take_profit: dec!(217.956),
            politician: "Jane Doe".to_string(),
            signal_score: 72.5,
            order_id: "paper-12ab34cd".to_string(),
            opened_at: Utc::now(),
            pnl: dec!(0),
            is_open: true,
        }
    }

    #[test]
    fn signal_files_are_timestamped_json_arrays() {
        let journal = temp_journal("signals");
        let at = Utc.with_ymd_and_hms(2025, 8, 7, 14, 30, 0).unwrap();

        let path = journal.record_signals(&[sample_signal()], at).unwrap();
        assert!(path.ends_with("signals_20250807_1430.json"));

        let body = fs::read_to_string(&path).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["symbol"], "NVDA");
        assert_eq!(parsed[0]["recommendation"], "BUY");
        assert_eq!(parsed[0]["urgency"], "TODAY");
        assert_eq!(parsed[0]["delay_days"], 49);
    }

    #[test]
    fn executions_append_one_line_each() {
        let journal = temp_journal("executions");
        let at = Utc.with_ymd_and_hms(2025, 8, 7, 14, 30, 0).unwrap();

        journal
            .record_execution(&sample_signal(), &sample_position(), at)
            .unwrap();
        journal
            .record_execution(&sample_signal(), &sample_position(), at)
            .unwrap();

        let body = fs::read_to_string(journal.dir().join("executed_trades.jsonl")).unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 2);

        let entry: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(entry["symbol"], "NVDA");
        assert_eq!(entry["shares"], 40);
        assert_eq!(entry["entry_price"], "181.63");
    }

    #[test]
    fn latest_signal_file_picks_newest_stamp() {
        let journal = temp_journal("latest");
        assert!(journal.latest_signal_file().unwrap().is_none());

        let early = Utc.with_ymd_and_hms(2025, 8, 7, 9, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 8, 7, 15, 0, 0).unwrap();
        journal.record_signals(&[], early).unwrap();
        let late_path = journal.record_signals(&[], late).unwrap();

        assert_eq!(journal.latest_signal_file().unwrap(), Some(late_path));
    }
}
