//! Static reference tables: curated politician profiles and the
//! committee-to-sector map.
//!
//! Both tables are immutable and injected into the scorers at construction,
//! so tests can substitute synthetic data.

use std::collections::HashMap;

/// Curated track-record profile for one legislator.
///
/// `historical_alpha` is a subjective accuracy rating in [0, 1], maintained
/// by hand from public analysis of past filings, not computed from data.
#[derive(Debug, Clone)]
pub struct PoliticianProfile {
    pub historical_alpha: f64,
    pub sectors: Vec<String>,
    pub late_filer: bool,
    pub notes: Option<String>,
}

/// Name-keyed table of [`PoliticianProfile`]s.
#[derive(Debug, Clone, Default)]
pub struct ProfileTable {
    profiles: HashMap<String, PoliticianProfile>,
}

impl ProfileTable {
    #[must_use]
    pub fn new(profiles: HashMap<String, PoliticianProfile>) -> Self {
        Self { profiles }
    }

    /// The built-in curated set.
    #[must_use]
    pub fn curated() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            "Nancy Pelosi".to_string(),
            PoliticianProfile {
                historical_alpha: 0.92,
                sectors: vec!["tech".to_string(), "pharma".to_string()],
                late_filer: false,
                notes: Some("Spouse's trades, frequently NVDA/AAPL/TSLA".to_string()),
            },
        );
        profiles.insert(
            "Dan Crenshaw".to_string(),
            PoliticianProfile {
                historical_alpha: 0.71,
                sectors: vec!["defense".to_string(), "energy".to_string()],
                late_filer: true,
                notes: None,
            },
        );
        profiles.insert(
            "Tommy Tuberville".to_string(),
            PoliticianProfile {
                historical_alpha: 0.68,
                sectors: vec!["defense".to_string()],
                late_filer: true,
                notes: Some("Bought defense names while on Armed Services".to_string()),
            },
        );
        profiles.insert(
            "Josh Gottheimer".to_string(),
            PoliticianProfile {
                historical_alpha: 0.65,
                sectors: vec!["fintech".to_string(), "banking".to_string()],
                late_filer: false,
                notes: None,
            },
        );
        profiles.insert(
            "Michael McCaul".to_string(),
            PoliticianProfile {
                historical_alpha: 0.60,
                sectors: vec!["tech".to_string(), "defense".to_string()],
                late_filer: true,
                notes: None,
            },
        );
        Self { profiles }
    }

    #[must_use]
    pub fn get(&self, politician: &str) -> Option<&PoliticianProfile> {
        self.profiles.get(politician)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profiles sorted by descending historical alpha.
    #[must_use]
    pub fn ranked_by_alpha(&self) -> Vec<(&str, &PoliticianProfile)> {
        let mut ranked: Vec<_> = self
            .profiles
            .iter()
            .map(|(name, profile)| (name.as_str(), profile))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.historical_alpha
                .partial_cmp(&a.1.historical_alpha)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }
}

/// Maps a committee name to the symbols considered in its jurisdiction.
#[derive(Debug, Clone, Default)]
pub struct CommitteeSectorMap {
    sectors: HashMap<String, Vec<String>>,
}

impl CommitteeSectorMap {
    #[must_use]
    pub fn new(sectors: HashMap<String, Vec<String>>) -> Self {
        Self { sectors }
    }

    /// The built-in curated map.
    #[must_use]
    pub fn curated() -> Self {
        let entries: [(&str, &[&str]); 7] = [
            (
                "Armed Services",
                &["LMT", "RTX", "NOC", "BA", "GD", "HII", "LDOS", "CACI", "SAIC"],
            ),
            (
                "Financial Services",
                &["JPM", "BAC", "GS", "MS", "V", "MA", "SQ", "PYPL"],
            ),
            ("Banking", &["JPM", "BAC", "WFC", "C", "USB", "PNC"]),
            ("Energy and Commerce", &["UNH", "CVS", "CI", "HUM", "CNC"]),
            (
                "Science, Space, and Technology",
                &["NVDA", "AMD", "INTC", "MSFT", "GOOGL", "META"],
            ),
            ("Energy", &["XOM", "CVX", "COP", "SLB", "HAL", "EOG"]),
            ("Agriculture", &["DE", "ADM", "BG", "MOS", "NTR"]),
        ];

        let sectors = entries
            .into_iter()
            .map(|(committee, symbols)| {
                (
                    committee.to_string(),
                    symbols.iter().map(|s| (*s).to_string()).collect(),
                )
            })
            .collect();
        Self { sectors }
    }

    /// True when `symbol` falls under `committee`'s jurisdiction.
    #[must_use]
    pub fn covers(&self, committee: &str, symbol: &str) -> bool {
        self.sectors
            .get(committee)
            .is_some_and(|symbols| symbols.iter().any(|s| s == symbol))
    }
}
