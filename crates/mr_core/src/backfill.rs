//! Fill-if-missing backfill of page facts into the canonical table.
//!
//! Page data augments, never overrides: a cell is written only when it is
//! currently blank and the page observed a value. Counters track every cell
//! changed, per family, and must sum to exactly the number of cells written
//! (used as a regression check by the apply summary).

use crate::pagefact::PageFact;
use crate::schema::{set_tb_col, SIDES};
use crate::table::MatchTable;
use serde::Serialize;

/// Cells filled per family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackfillCounters {
    pub tb_filled: u64,
    pub time_filled: u64,
    pub datetime_filled: u64,
    pub surface_filled: u64,
}

impl BackfillCounters {
    pub fn total(&self) -> u64 {
        self.tb_filled + self.time_filled + self.datetime_filled + self.surface_filled
    }
}

/// Make sure the surface column exists before a backfill pass that may
/// write it; schemas from older exports lack it entirely.
pub fn ensure_surface_column(table: &mut MatchTable) -> usize {
    table.add_column("court_type")
}

/// Backfill one row from its joined page fact. Fields whose column is
/// absent from the schema are skipped.
pub fn backfill_row(
    table: &mut MatchTable,
    row: usize,
    fact: &PageFact,
    counters: &mut BackfillCounters,
) {
    // Tiebreak loser scores: 3 sets x 2 sides.
    for set_n in 1..=3u8 {
        for side in SIDES {
            if fill(table, row, &set_tb_col(side, set_n), fact.set_tb(set_n, side)) {
                counters.tb_filled += 1;
            }
        }
    }

    // Elapsed times: overall + per set.
    if fill(table, row, "time_overall", fact.time_overall.as_deref()) {
        counters.time_filled += 1;
    }
    for set_n in 1..=3u8 {
        if fill(table, row, &format!("time_set{}", set_n), fact.time_set(set_n)) {
            counters.time_filled += 1;
        }
    }

    if fill(table, row, "list_date_time", fact.date_time.as_deref()) {
        counters.datetime_filled += 1;
    }

    if fill(table, row, "court_type", fact.court_type.as_deref()) {
        counters.surface_filled += 1;
    }
}

/// Write `value` into `col_name` only when the cell is blank and the value
/// is present. Returns whether the cell changed.
fn fill(table: &mut MatchTable, row: usize, col_name: &str, value: Option<&str>) -> bool {
    let Some(col) = table.column(col_name) else {
        return false;
    };
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return false;
    };
    if !table.is_missing(row, col) {
        return false;
    }
    table.set(row, col, value.to_string());
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_gaps() -> MatchTable {
        MatchTable::from_rows(
            &[
                "match_uid",
                "home_set1_tb",
                "away_set1_tb",
                "time_overall",
                "time_set1",
                "list_date_time",
            ],
            &[&["m1", "", "5", "", "0:41", ""]],
        )
        .unwrap()
    }

    fn fact() -> PageFact {
        PageFact {
            set1_tb_home: Some("3".to_string()),
            set1_tb_away: Some("9".to_string()),
            time_overall: Some("1:24".to_string()),
            time_set1: Some("0:50".to_string()),
            date_time: Some("04.07.2023 11:30".to_string()),
            court_type: Some("Clay".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_fills_only_blank_cells() {
        let mut t = table_with_gaps();
        let mut counters = BackfillCounters::default();
        backfill_row(&mut t, 0, &fact(), &mut counters);

        let get = |name: &str| t.get(0, t.column(name).unwrap()).to_string();
        assert_eq!(get("home_set1_tb"), "3");
        // Existing values are never overwritten.
        assert_eq!(get("away_set1_tb"), "5");
        assert_eq!(get("time_overall"), "1:24");
        assert_eq!(get("time_set1"), "0:41");
        assert_eq!(get("list_date_time"), "04.07.2023 11:30");

        assert_eq!(counters.tb_filled, 1);
        assert_eq!(counters.time_filled, 1);
        assert_eq!(counters.datetime_filled, 1);
        // No court_type column in this schema, so no surface fill.
        assert_eq!(counters.surface_filled, 0);
        assert_eq!(counters.total(), 3);
    }

    #[test]
    fn test_counters_sum_to_cells_changed() {
        let mut t = table_with_gaps();
        let before = t.row(0).to_vec();
        let mut counters = BackfillCounters::default();
        backfill_row(&mut t, 0, &fact(), &mut counters);

        let changed =
            before.iter().zip(t.row(0)).filter(|(old, new)| old != new).count() as u64;
        assert_eq!(counters.total(), changed);
    }

    #[test]
    fn test_surface_column_created_on_demand() {
        let mut t = table_with_gaps();
        ensure_surface_column(&mut t);
        let mut counters = BackfillCounters::default();
        backfill_row(&mut t, 0, &fact(), &mut counters);

        assert_eq!(t.get(0, t.column("court_type").unwrap()), "Clay");
        assert_eq!(counters.surface_filled, 1);
    }

    #[test]
    fn test_idempotent() {
        let mut t = table_with_gaps();
        ensure_surface_column(&mut t);
        let mut first = BackfillCounters::default();
        backfill_row(&mut t, 0, &fact(), &mut first);
        let after_first = t.row(0).to_vec();

        let mut second = BackfillCounters::default();
        backfill_row(&mut t, 0, &fact(), &mut second);
        assert_eq!(second.total(), 0);
        assert_eq!(t.row(0), after_first.as_slice());
    }

    #[test]
    fn test_blank_fact_values_do_not_fill() {
        let mut t = table_with_gaps();
        let fact = PageFact { time_overall: Some("  ".to_string()), ..Default::default() };
        let mut counters = BackfillCounters::default();
        backfill_row(&mut t, 0, &fact, &mut counters);
        assert_eq!(counters.total(), 0);
        assert!(t.is_missing(0, t.column("time_overall").unwrap()));
    }
}
