//! Home/away assignment reconciliation.
//!
//! The listing order of players in the source feed is not reliable; the
//! detail page is the ground truth. A match is classified by comparing the
//! table's recorded identities against the page-observed ones, ids first
//! (authoritative), surnames as fallback.

use serde::{Deserialize, Serialize};

/// Verdict of one reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Correct,
    Swapped,
    Unknown,
    Error,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Correct => "correct",
            AssignmentStatus::Swapped => "swapped",
            AssignmentStatus::Unknown => "unknown",
            AssignmentStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the verdict was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    IdMatch,
    NameMatch,
    NoMatch,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::IdMatch => "id_match",
            MatchMethod::NameMatch => "name_match",
            MatchMethod::NoMatch => "no_match",
        }
    }
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One source's view of who is home and who is away.
#[derive(Debug, Clone, Copy, Default)]
pub struct SideIdentity<'a> {
    pub home_name: Option<&'a str>,
    pub home_id: Option<&'a str>,
    pub away_name: Option<&'a str>,
    pub away_id: Option<&'a str>,
}

impl<'a> SideIdentity<'a> {
    fn home_id(&self) -> Option<&'a str> {
        present(self.home_id)
    }

    fn away_id(&self) -> Option<&'a str> {
        present(self.away_id)
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Last whitespace-delimited token, case-folded. Empty or absent names
/// yield an empty surname, which never matches.
pub fn surname(name: Option<&str>) -> String {
    present(name)
        .and_then(|n| n.split_whitespace().last())
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}

/// Classify a recorded home/away assignment against the page's.
///
/// Priority order:
/// 1. All four ids present: in-order equality is `correct`, crossed
///    equality is `swapped`, both via `id_match`.
/// 2. Surname comparison: in-order is `correct`, crossed is `swapped`,
///    via `name_match`.
/// 3. Otherwise `unknown` via `no_match`; no correction is applied on
///    ambiguous evidence.
pub fn classify(csv: &SideIdentity, page: &SideIdentity) -> (AssignmentStatus, MatchMethod) {
    if let (Some(ch), Some(ca), Some(ph), Some(pa)) =
        (csv.home_id(), csv.away_id(), page.home_id(), page.away_id())
    {
        if ch == ph && ca == pa {
            return (AssignmentStatus::Correct, MatchMethod::IdMatch);
        }
        if ch == pa && ca == ph {
            return (AssignmentStatus::Swapped, MatchMethod::IdMatch);
        }
    }

    let csv_h = surname(csv.home_name);
    let csv_a = surname(csv.away_name);
    let page_h = surname(page.home_name);
    let page_a = surname(page.away_name);

    if !csv_h.is_empty() && !page_h.is_empty() {
        if csv_h == page_h && csv_a == page_a {
            return (AssignmentStatus::Correct, MatchMethod::NameMatch);
        }
        if csv_h == page_a && csv_a == page_h {
            return (AssignmentStatus::Swapped, MatchMethod::NameMatch);
        }
    }

    (AssignmentStatus::Unknown, MatchMethod::NoMatch)
}
