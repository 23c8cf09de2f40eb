//! Column families of the match-record table.
//!
//! One row per match. Per side (`home`/`away`) the table carries an overall
//! and a per-set (`s1`..`s3`) copy of 20 stat counters, plus set scores
//! (`home_set1`..), tiebreak loser scores (`home_set1_tb`..), elapsed times
//! and the textual `match_score`. Column names are built here so the engines
//! never concatenate strings ad hoc.

/// Participant sides, in column-prefix order.
pub const SIDES: [&str; 2] = ["home", "away"];

/// The 20 stat suffixes that exist per side per scope.
pub const PER_SET_STAT_SUFFIXES: [&str; 20] = [
    "service_pts_won",
    "service_pts_played",
    "return_pts_won",
    "return_pts_played",
    "service_games_won",
    "service_games_played",
    "return_games_won",
    "return_games_played",
    "tb_serve_pts_won",
    "tb_serve_pts_played",
    "tb_return_pts_won",
    "tb_return_pts_played",
    "bp_saved",
    "bp_faced",
    "bp_converted",
    "bp_opportunities",
    "sp_saved",
    "sp_faced",
    "mp_saved",
    "mp_faced",
];

/// Tiebreak-point stat suffixes (subset of [`PER_SET_STAT_SUFFIXES`]).
pub const TB_STAT_SUFFIXES: [&str; 4] = [
    "tb_serve_pts_won",
    "tb_serve_pts_played",
    "tb_return_pts_won",
    "tb_return_pts_played",
];

/// Match-point sub-stats checked by the set-1 impossibility rule. The
/// current schema only carries saved/faced for MP, but converted and
/// opportunities columns are nulled too when a competition-level schema
/// has them.
pub const MP_SUB_STATS: [&str; 4] = ["saved", "faced", "converted", "opportunities"];

/// Statistic scope: the whole match or one set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Overall,
    Set(u8),
}

impl Scope {
    /// Column name for a side/suffix pair in this scope.
    ///
    /// Overall columns are `{side}_{suffix}`, per-set columns are
    /// `{side}_s{n}_{suffix}`.
    pub fn stat_col(&self, side: &str, suffix: &str) -> String {
        match self {
            Scope::Overall => format!("{}_{}", side, suffix),
            Scope::Set(n) => format!("{}_s{}_{}", side, n, suffix),
        }
    }
}

/// All scopes, overall first.
pub const SCOPES: [Scope; 4] = [Scope::Overall, Scope::Set(1), Scope::Set(2), Scope::Set(3)];

/// Games-won score column for one set, e.g. `home_set2`.
pub fn set_score_col(side: &str, set_n: u8) -> String {
    format!("{}_set{}", side, set_n)
}

/// Tiebreak loser-score column for one set, e.g. `away_set3_tb`.
pub fn set_tb_col(side: &str, set_n: u8) -> String {
    format!("{}_set{}_tb", side, set_n)
}

/// A saved/faced (and optionally converted/opportunities) counter pair.
///
/// A "saved" counter is meaningless without a non-zero "faced" denominator,
/// likewise "converted" against "opportunities". The nullification engine
/// iterates this table instead of repeating the logic per family.
#[derive(Debug, Clone, Copy)]
pub struct PointFamily {
    pub key: &'static str,
    pub saved: &'static str,
    pub faced: &'static str,
    pub converted: Option<&'static str>,
    pub opportunities: Option<&'static str>,
}

/// Break/set/match point families. Only break points carry a
/// converted/opportunities pair in this dataset.
pub const POINT_FAMILIES: [PointFamily; 3] = [
    PointFamily {
        key: "bp",
        saved: "bp_saved",
        faced: "bp_faced",
        converted: Some("bp_converted"),
        opportunities: Some("bp_opportunities"),
    },
    PointFamily {
        key: "sp",
        saved: "sp_saved",
        faced: "sp_faced",
        converted: None,
        opportunities: None,
    },
    PointFamily {
        key: "mp",
        saved: "mp_saved",
        faced: "mp_faced",
        converted: None,
        opportunities: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_col_names() {
        assert_eq!(Scope::Overall.stat_col("home", "bp_saved"), "home_bp_saved");
        assert_eq!(Scope::Set(3).stat_col("away", "mp_faced"), "away_s3_mp_faced");
    }

    #[test]
    fn test_score_col_names() {
        assert_eq!(set_score_col("home", 1), "home_set1");
        assert_eq!(set_tb_col("away", 2), "away_set2_tb");
    }

    #[test]
    fn test_tb_suffixes_are_stat_suffixes() {
        for tb in TB_STAT_SUFFIXES {
            assert!(PER_SET_STAT_SUFFIXES.contains(&tb));
        }
    }

    #[test]
    fn test_point_family_pairs() {
        for fam in POINT_FAMILIES {
            assert!(PER_SET_STAT_SUFFIXES.contains(&fam.saved));
            assert!(PER_SET_STAT_SUFFIXES.contains(&fam.faced));
            assert_eq!(fam.converted.is_some(), fam.opportunities.is_some());
        }
    }
}
