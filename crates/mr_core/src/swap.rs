//! Home/away swap correction.
//!
//! When reconciliation finds a swapped row, every side-specific field must
//! change sides together: player names and ids, every `home_*`/`away_*`
//! column pair (set scores, tiebreak scores, all stat columns are named by
//! side prefix), and the textual `match_score`. Times and dates describe
//! the match as a whole and stay put.

use crate::error::FixError;
use crate::table::MatchTable;

/// Column pairs to exchange, resolved once per table.
#[derive(Debug, Clone)]
pub struct SwapPlan {
    pairs: Vec<(usize, usize)>,
    score_col: Option<usize>,
}

impl SwapPlan {
    /// Pair `player_home`/`player_away`, their id columns, and every
    /// `home_*` column with its `away_*` counterpart. Columns without a
    /// counterpart are left alone.
    pub fn build(table: &MatchTable) -> Self {
        let mut pairs = Vec::new();

        for (home_col, away_col) in
            [("player_home", "player_away"), ("player_home_id", "player_away_id")]
        {
            if let (Some(h), Some(a)) = (table.column(home_col), table.column(away_col)) {
                pairs.push((h, a));
            }
        }

        for (h, header) in table.headers().iter().enumerate() {
            if let Some(suffix) = header.strip_prefix("home_") {
                if let Some(a) = table.column(&format!("away_{}", suffix)) {
                    pairs.push((h, a));
                }
            }
        }

        SwapPlan { pairs, score_col: table.column("match_score") }
    }

    pub fn n_pairs(&self) -> usize {
        self.pairs.len()
    }

    /// Swap one row in place.
    ///
    /// The flipped score and all paired values are staged before any cell
    /// is written, so a malformed `match_score` leaves the row untouched
    /// instead of half-swapped.
    pub fn apply(&self, table: &mut MatchTable, row: usize) -> Result<(), FixError> {
        let flipped_score = match self.score_col {
            Some(col) if !table.is_missing(row, col) => {
                Some((col, flip_score(table.get(row, col))?))
            }
            _ => None,
        };

        let mut staged: Vec<(usize, String)> = Vec::with_capacity(self.pairs.len() * 2 + 1);
        for &(h, a) in &self.pairs {
            staged.push((h, table.get(row, a).to_string()));
            staged.push((a, table.get(row, h).to_string()));
        }
        if let Some((col, score)) = flipped_score {
            staged.push((col, score));
        }

        for (col, value) in staged {
            table.set(row, col, value);
        }
        Ok(())
    }
}

/// `"W-L"` → `"L-W"`.
fn flip_score(score: &str) -> Result<String, FixError> {
    let trimmed = score.trim();
    match trimmed.split_once('-') {
        Some((w, l)) if !w.trim().is_empty() && !l.trim().is_empty() => {
            Ok(format!("{}-{}", l.trim(), w.trim()))
        }
        _ => Err(FixError::MalformedScore(trimmed.to_string())),
    }
}
