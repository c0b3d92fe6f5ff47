//! Per-politician track-record scoring.

use crate::tables::ProfileTable;
use capitol_trade_core::Trade;

/// Ceiling for the politician sub-score.
pub const MAX_POLITICIAN_SCORE: f64 = 40.0;

/// Points per unit of historical alpha.
const ALPHA_WEIGHT: f64 = 35.0;

/// Late filings above this count earn the flat chronic-late bonus.
const LATE_FILING_THRESHOLD: usize = 5;

const LATE_FILER_BONUS: f64 = 5.0;

/// Scores the author of a trade from the curated profile table plus their
/// filing behavior across the supplied history.
pub struct PoliticianScorer {
    profiles: ProfileTable,
}

impl PoliticianScorer {
    #[must_use]
    pub fn new(profiles: ProfileTable) -> Self {
        Self { profiles }
    }

    /// Returns a score in [0, [`MAX_POLITICIAN_SCORE`]] and the reasons.
    ///
    /// Politicians absent from the profile table get nothing from the alpha
    /// rule but can still accrue the chronic-late bonus.
    #[must_use]
    pub fn score(&self, politician: &str, history: &[Trade]) -> (f64, Vec<String>) {
        let mut pts = 0.0;
        let mut reasons = Vec::new();

        if let Some(profile) = self.profiles.get(politician) {
            pts += profile.historical_alpha * ALPHA_WEIGHT;
            reasons.push(format!(
                "known profile: alpha {:.0}%",
                profile.historical_alpha * 100.0
            ));
        }

        let late_count = history
            .iter()
            .filter(|t| t.politician == politician && t.is_late())
            .count();
        if late_count > LATE_FILING_THRESHOLD {
            pts += LATE_FILER_BONUS;
            reasons.push(format!("chronic late filer: {late_count} late disclosures"));
        }

        (pts.min(MAX_POLITICIAN_SCORE), reasons)
    }
}
