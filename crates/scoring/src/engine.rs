//! The scoring pass: combines the three scorers into ranked signals.

use crate::cluster::ClusterDetector;
use crate::politician_scorer::PoliticianScorer;
use crate::tables::{CommitteeSectorMap, ProfileTable};
use crate::trade_scorer::TradeScorer;
use capitol_trade_core::{tier_for_score, Trade, TradeSignal};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Combines the politician, trade, and cluster scorers into a ranked,
/// deduplicated, filtered signal list.
///
/// Each sub-score is capped independently before summing (politician <= 40,
/// trade <= 40, cluster <= 20), so the total is bounded by construction.
pub struct SignalEngine {
    politician_scorer: PoliticianScorer,
    trade_scorer: TradeScorer,
    cluster_detector: ClusterDetector,
}

impl SignalEngine {
    #[must_use]
    pub fn new(
        profiles: ProfileTable,
        committees: CommitteeSectorMap,
        cluster_window_days: i64,
    ) -> Self {
        Self {
            politician_scorer: PoliticianScorer::new(profiles),
            trade_scorer: TradeScorer::new(committees),
            cluster_detector: ClusterDetector::new(cluster_window_days),
        }
    }

    /// The curated reference tables with a 30-day cluster window.
    #[must_use]
    pub fn with_curated_tables(cluster_window_days: i64) -> Self {
        Self::new(
            ProfileTable::curated(),
            CommitteeSectorMap::curated(),
            cluster_window_days,
        )
    }

    /// Scores a batch of trades against the full history.
    ///
    /// Clusters are built over the full history, not just the batch, so they
    /// reflect all known activity. Within one pass, at most one signal is
    /// emitted per symbol/transaction-date pair, in feed order. The result is
    /// sorted by descending total score; ties keep feed order.
    #[must_use]
    pub fn generate_signals(
        &self,
        batch: &[Trade],
        history: &[Trade],
        as_of: NaiveDate,
    ) -> Vec<TradeSignal> {
        let clusters = self.cluster_detector.detect(history, as_of);

        let mut signals = Vec::new();
        let mut seen: HashSet<(String, NaiveDate)> = HashSet::new();

        for trade in batch {
            if !trade.is_purchase() {
                continue;
            }
            if !seen.insert((trade.symbol.clone(), trade.transaction_date)) {
                continue;
            }

            let (politician_score, politician_reasons) =
                self.politician_scorer.score(&trade.politician, history);
            let (trade_score, trade_reasons) = self.trade_scorer.score(trade);
            let (cluster_score, cluster_reasons) =
                self.cluster_detector.score_for_symbol(&trade.symbol, &clusters);

            let total = politician_score + trade_score + cluster_score;
            let Some((recommendation, urgency, suggested_size)) = tier_for_score(total) else {
                continue;
            };

            let mut reasons = politician_reasons;
            reasons.extend(trade_reasons);
            reasons.extend(cluster_reasons);

            signals.push(TradeSignal {
                trade: trade.clone(),
                total_score: total,
                politician_score,
                trade_score,
                cluster_score,
                recommendation,
                urgency,
                suggested_size,
                reasons,
            });
        }

        // Stable sort: ties keep feed-then-discovery order.
        signals.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(Ordering::Equal)
        });

        tracing::info!(
            signals = signals.len(),
            trades = batch.len(),
            "scoring pass complete"
        );
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::PoliticianProfile;
    use capitol_trade_core::{Chamber, Recommendation, Urgency};
    use chrono::Duration;
    use std::collections::HashMap;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    }

    fn trade(politician: &str, symbol: &str, tx: NaiveDate) -> Trade {
        Trade {
            trade_id: format!("{politician}-{symbol}-{tx}"),
            politician: politician.to_string(),
            chamber: Chamber::House,
            party: "Independent".to_string(),
            state: "TX".to_string(),
            symbol: symbol.to_string(),
            asset_name: symbol.to_string(),
            trade_type: "Purchase".to_string(),
            amount_low: 1_001,
            amount_high: 15_000,
            transaction_date: tx,
            disclosure_date: tx,
            filing_delay_days: 0,
            is_option: false,
            committee: None,
            notes: String::new(),
        }
    }

    fn alpha_table(name: &str, alpha: f64) -> ProfileTable {
        let mut profiles = HashMap::new();
        profiles.insert(
            name.to_string(),
            PoliticianProfile {
                historical_alpha: alpha,
                sectors: vec![],
                late_filer: false,
                notes: None,
            },
        );
        ProfileTable::new(profiles)
    }

    #[test]
    fn weak_trades_emit_nothing() {
        // Unknown politician, small purchase, no cluster: total 2 < 40.
        let engine = SignalEngine::new(ProfileTable::default(), CommitteeSectorMap::default(), 30);
        let batch = vec![trade("Nobody", "NVDA", as_of() - Duration::days(2))];
        let signals = engine.generate_signals(&batch, &batch, as_of());
        assert!(signals.is_empty());
    }

    #[test]
    fn sales_never_emit_signals() {
        let engine = SignalEngine::new(
            alpha_table("Big Name", 1.0),
            CommitteeSectorMap::default(),
            30,
        );
        let mut sale = trade("Big Name", "NVDA", as_of() - Duration::days(2));
        sale.trade_type = "Sale (Full)".to_string();
        sale.amount_low = 1_000_001;
        sale.amount_high = 5_000_000;

        let batch = vec![sale];
        let signals = engine.generate_signals(&batch, &batch, as_of());
        assert!(signals.is_empty());
    }

    #[test]
    fn same_symbol_same_day_deduplicates() {
        let engine = SignalEngine::new(
            alpha_table("Big Name", 1.0),
            CommitteeSectorMap::default(),
            30,
        );
        let day = as_of() - Duration::days(2);
        let mut a = trade("Big Name", "NVDA", day);
        a.amount_low = 250_001;
        a.amount_high = 500_000;
        let mut b = trade("Big Name", "NVDA", day);
        b.amount_low = 1_000_001;
        b.amount_high = 5_000_000;

        let batch = vec![a, b];
        let signals = engine.generate_signals(&batch, &batch, as_of());
        assert_eq!(signals.len(), 1);
        // First in feed order wins.
        assert!((signals[0].trade_score - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn same_symbol_different_day_both_emit() {
        let engine = SignalEngine::new(
            alpha_table("Big Name", 1.0),
            CommitteeSectorMap::default(),
            30,
        );
        let mut a = trade("Big Name", "NVDA", as_of() - Duration::days(2));
        a.amount_low = 50_001;
        a.amount_high = 100_000;
        let mut b = trade("Big Name", "NVDA", as_of() - Duration::days(3));
        b.amount_low = 50_001;
        b.amount_high = 100_000;
        let batch = vec![a, b];
        let signals = engine.generate_signals(&batch, &batch, as_of());
        assert_eq!(signals.len(), 2);
    }

    #[test]
    fn total_is_sum_of_sub_scores() {
        let engine = SignalEngine::new(
            alpha_table("Big Name", 0.9),
            CommitteeSectorMap::curated(),
            30,
        );
        let day = as_of() - Duration::days(2);
        let mut target = trade("Big Name", "LMT", day);
        target.amount_low = 1_000_001;
        target.amount_high = 1_400_000;
        target.filing_delay_days = 95;
        target.committee = Some("Armed Services".to_string());

        let mut history = vec![
            target.clone(),
            trade("Other A", "LMT", day),
            trade("Other B", "LMT", day - Duration::days(1)),
            trade("Other C", "LMT", day - Duration::days(2)),
        ];
        history.rotate_right(1);

        let signals = engine.generate_signals(&[target], &history, as_of());
        assert_eq!(signals.len(), 1);
        let signal = &signals[0];

        // 0.9 * 35 = 31.5; 15 + 7 + 10 = 32; 4 distinct buyers -> capped 20.
        assert!((signal.politician_score - 31.5).abs() < 1e-9);
        assert!((signal.trade_score - 32.0).abs() < f64::EPSILON);
        assert!((signal.cluster_score - 20.0).abs() < f64::EPSILON);
        assert!((signal.total_score - 83.5).abs() < 1e-9);
        assert_eq!(signal.recommendation, Recommendation::StrongBuy);
        assert_eq!(signal.urgency, Urgency::Immediate);
    }

    #[test]
    fn no_signal_below_forty() {
        let engine = SignalEngine::new(
            alpha_table("Mid Name", 0.5),
            CommitteeSectorMap::default(),
            30,
        );
        // 0.5 * 35 = 17.5 + 2 (small) = 19.5 < 40
        let batch = vec![trade("Mid Name", "NVDA", as_of() - Duration::days(2))];
        let signals = engine.generate_signals(&batch, &batch, as_of());
        assert!(signals.is_empty());
    }

    #[test]
    fn signals_sort_descending_by_total() {
        let engine = SignalEngine::new(
            alpha_table("Big Name", 1.0),
            CommitteeSectorMap::default(),
            30,
        );
        let day = as_of() - Duration::days(2);
        let mut small = trade("Big Name", "AAA", day);
        small.amount_low = 50_001;
        small.amount_high = 100_000;
        let mut big = trade("Big Name", "BBB", day);
        big.amount_low = 1_000_001;
        big.amount_high = 5_000_000;

        let batch = vec![small, big];
        let signals = engine.generate_signals(&batch, &batch, as_of());
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0].trade.symbol, "BBB");
        assert!(signals[0].total_score >= signals[1].total_score);
    }

    #[test]
    fn clusters_use_full_history_not_batch() {
        let engine = SignalEngine::new(
            alpha_table("Big Name", 1.0),
            CommitteeSectorMap::default(),
            30,
        );
        let day = as_of() - Duration::days(2);
        let batch = vec![trade("Big Name", "NVDA", day)];
        // History holds buys by two other politicians the batch knows nothing of.
        let history = vec![
            batch[0].clone(),
            trade("Other A", "NVDA", day - Duration::days(4)),
            trade("Other B", "NVDA", day - Duration::days(6)),
        ];

        let signals = engine.generate_signals(&batch, &history, as_of());
        assert_eq!(signals.len(), 1);
        // 3 distinct buyers -> min(24, 20) = 20
        assert!((signals[0].cluster_score - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_batch_yields_empty_list() {
        let engine = SignalEngine::with_curated_tables(30);
        let signals = engine.generate_signals(&[], &[], as_of());
        assert!(signals.is_empty());
    }
}
