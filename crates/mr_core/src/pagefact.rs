//! Ground-truth facts observed on one match detail page.
//!
//! Produced by the external page scraper; consumed read-only by the
//! reconciliation and backfill passes. Any field may be absent, meaning
//! "not observed". A populated `error` signals extraction failure for the
//! whole match.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageFact {
    pub home_name: Option<String>,
    pub home_id: Option<String>,
    pub away_name: Option<String>,
    pub away_id: Option<String>,

    // Tiebreak loser scores per set per side.
    pub set1_tb_home: Option<String>,
    pub set1_tb_away: Option<String>,
    pub set2_tb_home: Option<String>,
    pub set2_tb_away: Option<String>,
    pub set3_tb_home: Option<String>,
    pub set3_tb_away: Option<String>,

    // Set scores, kept for cross-checking.
    pub set1_home: Option<String>,
    pub set1_away: Option<String>,
    pub set2_home: Option<String>,
    pub set2_away: Option<String>,
    pub set3_home: Option<String>,
    pub set3_away: Option<String>,

    pub time_overall: Option<String>,
    pub time_set1: Option<String>,
    pub time_set2: Option<String>,
    pub time_set3: Option<String>,

    pub date_time: Option<String>,
    pub court_type: Option<String>,

    pub error: Option<String>,
}

impl PageFact {
    pub fn set_tb(&self, set_n: u8, side: &str) -> Option<&str> {
        let field = match (set_n, side) {
            (1, "home") => &self.set1_tb_home,
            (1, "away") => &self.set1_tb_away,
            (2, "home") => &self.set2_tb_home,
            (2, "away") => &self.set2_tb_away,
            (3, "home") => &self.set3_tb_home,
            (3, "away") => &self.set3_tb_away,
            _ => &None,
        };
        field.as_deref()
    }

    pub fn time_set(&self, set_n: u8) -> Option<&str> {
        let field = match set_n {
            1 => &self.time_set1,
            2 => &self.time_set2,
            3 => &self.time_set3,
            _ => &None,
        };
        field.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.error.as_deref().map(str::trim).is_some_and(|e| !e.is_empty())
    }
}
