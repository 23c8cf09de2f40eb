//! Reconciliation artifact: one row per audited match.
//!
//! Shard scrapers append these rows as they go; `combine` concatenates the
//! shards and keeps the last occurrence per `match_uid` (a re-scrape
//! supersedes an earlier attempt). The apply pass joins the combined
//! artifact back onto the canonical table.

use crate::pagefact::PageFact;
use crate::reconcile::{classify, AssignmentStatus, MatchMethod, SideIdentity};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One audited match, as persisted in the artifact CSV. Field order is the
/// artifact's column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditRecord {
    pub match_uid: String,
    pub ha_status: Option<String>,
    pub ha_method: Option<String>,

    pub csv_home_name: Option<String>,
    pub csv_home_id: Option<String>,
    pub csv_away_name: Option<String>,
    pub csv_away_id: Option<String>,

    pub page_home_name: Option<String>,
    pub page_home_id: Option<String>,
    pub page_away_name: Option<String>,
    pub page_away_id: Option<String>,

    pub page_set1_tb_home: Option<String>,
    pub page_set1_tb_away: Option<String>,
    pub page_set2_tb_home: Option<String>,
    pub page_set2_tb_away: Option<String>,
    pub page_set3_tb_home: Option<String>,
    pub page_set3_tb_away: Option<String>,

    pub page_set1_home: Option<String>,
    pub page_set1_away: Option<String>,
    pub page_set2_home: Option<String>,
    pub page_set2_away: Option<String>,
    pub page_set3_home: Option<String>,
    pub page_set3_away: Option<String>,

    pub page_time_overall: Option<String>,
    pub page_time_set1: Option<String>,
    pub page_time_set2: Option<String>,
    pub page_time_set3: Option<String>,

    pub page_date_time: Option<String>,
    pub page_court_type: Option<String>,

    pub error: Option<String>,
}

impl AuditRecord {
    /// The page-observed facts carried by this record.
    pub fn page_fact(&self) -> PageFact {
        PageFact {
            home_name: self.page_home_name.clone(),
            home_id: self.page_home_id.clone(),
            away_name: self.page_away_name.clone(),
            away_id: self.page_away_id.clone(),
            set1_tb_home: self.page_set1_tb_home.clone(),
            set1_tb_away: self.page_set1_tb_away.clone(),
            set2_tb_home: self.page_set2_tb_home.clone(),
            set2_tb_away: self.page_set2_tb_away.clone(),
            set3_tb_home: self.page_set3_tb_home.clone(),
            set3_tb_away: self.page_set3_tb_away.clone(),
            set1_home: self.page_set1_home.clone(),
            set1_away: self.page_set1_away.clone(),
            set2_home: self.page_set2_home.clone(),
            set2_away: self.page_set2_away.clone(),
            set3_home: self.page_set3_home.clone(),
            set3_away: self.page_set3_away.clone(),
            time_overall: self.page_time_overall.clone(),
            time_set1: self.page_time_set1.clone(),
            time_set2: self.page_time_set2.clone(),
            time_set3: self.page_time_set3.clone(),
            date_time: self.page_date_time.clone(),
            court_type: self.page_court_type.clone(),
            error: self.error.clone(),
        }
    }

    pub fn csv_identity(&self) -> SideIdentity<'_> {
        SideIdentity {
            home_name: self.csv_home_name.as_deref(),
            home_id: self.csv_home_id.as_deref(),
            away_name: self.csv_away_name.as_deref(),
            away_id: self.csv_away_id.as_deref(),
        }
    }

    pub fn page_identity(&self) -> SideIdentity<'_> {
        SideIdentity {
            home_name: self.page_home_name.as_deref(),
            home_id: self.page_home_id.as_deref(),
            away_name: self.page_away_name.as_deref(),
            away_id: self.page_away_id.as_deref(),
        }
    }

    /// Re-derive the verdict from the recorded identity fields rather than
    /// trusting the persisted `ha_status`. A recorded extraction error
    /// forces `error` with no method.
    pub fn classify(&self) -> (AssignmentStatus, Option<MatchMethod>) {
        if self.error.as_deref().map(str::trim).is_some_and(|e| !e.is_empty()) {
            return (AssignmentStatus::Error, None);
        }
        let (status, method) = classify(&self.csv_identity(), &self.page_identity());
        (status, Some(method))
    }
}

/// Merge shard outputs: keep the last occurrence of each `match_uid`,
/// preserving encounter order of the surviving rows.
pub fn dedup_keep_last(records: Vec<AuditRecord>) -> Vec<AuditRecord> {
    let mut last_pos: FxHashMap<String, usize> = FxHashMap::default();
    for (i, rec) in records.iter().enumerate() {
        last_pos.insert(rec.match_uid.clone(), i);
    }
    records
        .into_iter()
        .enumerate()
        .filter(|(i, rec)| last_pos.get(&rec.match_uid) == Some(i))
        .map(|(_, rec)| rec)
        .collect()
}

/// Index a combined artifact by `match_uid` for the apply join.
pub fn index_by_uid(records: &[AuditRecord]) -> FxHashMap<&str, &AuditRecord> {
    let mut index = FxHashMap::default();
    for rec in records {
        // Later rows win, matching dedup_keep_last semantics.
        index.insert(rec.match_uid.as_str(), rec);
    }
    index
}
