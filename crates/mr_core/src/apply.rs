//! Apply a combined reconciliation artifact to the canonical table.
//!
//! Per table row, in order: join on `match_uid`, re-derive the assignment
//! verdict from the recorded identities, swap the row if it is `swapped`,
//! then backfill missing facts from the page observation. Backfill runs
//! after the swap so filled values land on the correct side.

use crate::audit::{index_by_uid, AuditRecord};
use crate::backfill::{backfill_row, ensure_surface_column, BackfillCounters};
use crate::error::FixError;
use crate::reconcile::AssignmentStatus;
use crate::swap::SwapPlan;
use crate::table::MatchTable;
use serde::Serialize;

/// Outcome of one apply pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// Table rows with a record in the artifact.
    pub matched_rows: u64,
    pub correct: u64,
    pub swapped: u64,
    pub unknown: u64,
    pub errors: u64,
    /// Swapped rows left untouched because the score could not be flipped.
    pub swap_skipped: u64,
    pub backfill: BackfillCounters,
}

/// Correct and complete `table` in place from `records`.
///
/// Rows without an artifact record are left untouched. A malformed
/// `match_score` on a swapped row skips that row's swap (and is counted)
/// instead of aborting the run; its backfill still happens.
pub fn apply_audit(table: &mut MatchTable, records: &[AuditRecord]) -> Result<ApplyReport, FixError> {
    let uid_col = table.require_column("match_uid")?;

    if records.iter().any(|r| r.page_court_type.is_some()) {
        ensure_surface_column(table);
    }
    let plan = SwapPlan::build(table);
    let index = index_by_uid(records);

    let mut report = ApplyReport::default();
    for row in 0..table.n_rows() {
        let Some(record) = index.get(table.get(row, uid_col).trim()).copied() else {
            continue;
        };
        report.matched_rows += 1;

        let (status, _) = record.classify();
        match status {
            AssignmentStatus::Correct => report.correct += 1,
            AssignmentStatus::Unknown => report.unknown += 1,
            AssignmentStatus::Error => report.errors += 1,
            AssignmentStatus::Swapped => match plan.apply(table, row) {
                Ok(()) => report.swapped += 1,
                Err(FixError::MalformedScore(score)) => {
                    log::warn!(
                        "row {}: swap skipped, match score '{}' cannot be flipped",
                        row,
                        score
                    );
                    report.swap_skipped += 1;
                }
                Err(e) => return Err(e),
            },
        }

        let fact = record.page_fact();
        if !fact.is_error() {
            backfill_row(table, row, &fact, &mut report.backfill);
        }
    }

    Ok(report)
}
