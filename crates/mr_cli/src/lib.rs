//! Pipeline entry points for the `mr` CLI.
//!
//! Each command is a thin load → engine → save wrapper around `mr_core`,
//! returning a summary struct the binary prints. Writes that replace an
//! existing input take a timestamped backup copy first.

use anyhow::{bail, Context, Result};
use mr_core::audit::dedup_keep_last;
use mr_core::nullify::{self, NullifyReport, ValidationReport};
use mr_core::reconcile::AssignmentStatus;
use mr_core::{apply_audit, store, ApplyReport};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

/// Outcome of one `fix-nan` run.
#[derive(Debug)]
pub struct FixNanSummary {
    pub rows: usize,
    pub stat_columns: usize,
    pub zeros_before: u64,
    pub zeros_after: u64,
    pub missing_before: u64,
    pub missing_after: u64,
    pub report: NullifyReport,
    pub validation: ValidationReport,
    /// Backup taken before overwriting the input, if any.
    pub backup: Option<PathBuf>,
}

/// Run the nullification engine over one table file.
///
/// With no explicit output the input is rewritten in place, after a
/// timestamped backup copy. A dry run computes everything and writes
/// nothing.
pub fn run_fix_nan(input: &Path, output: Option<&Path>, dry_run: bool) -> Result<FixNanSummary> {
    let mut table = store::load_table(input)?;
    let stat_cols = nullify::stat_columns(&table);

    let zeros_before = table.count_zeros(&stat_cols);
    let missing_before = table.count_missing(&stat_cols);

    let report = nullify::nullify(&mut table);
    let validation = nullify::validate(&table);

    let mut backup = None;
    if !dry_run {
        let out = output.unwrap_or(input);
        if out == input {
            backup = Some(backup_copy(input)?);
        }
        store::save_table(out, &table)?;
    }

    Ok(FixNanSummary {
        rows: table.n_rows(),
        stat_columns: stat_cols.len(),
        zeros_before,
        zeros_after: table.count_zeros(&stat_cols),
        missing_before,
        missing_after: table.count_missing(&stat_cols),
        report,
        validation,
        backup,
    })
}

/// Outcome of one `combine` run.
#[derive(Debug)]
pub struct CombineSummary {
    pub shard_files: Vec<PathBuf>,
    pub total_rows: usize,
    pub unique_rows: usize,
    pub correct: u64,
    pub swapped: u64,
    pub unknown: u64,
    pub errors: u64,
    /// Rows carrying at least one tiebreak loser score.
    pub tb_coverage: u64,
    /// Rows carrying an overall elapsed time.
    pub time_coverage: u64,
    /// Rows carrying a surface.
    pub surface_coverage: u64,
    /// Surface distribution over the surviving rows, most common first.
    pub court_types: Vec<(String, u64)>,
    pub output: PathBuf,
}

/// Merge every shard artifact next to `output_base` into one combined
/// file, keeping the last occurrence per `match_uid`.
pub fn run_combine(output_base: &Path) -> Result<CombineSummary> {
    let shard_files = discover_shards(output_base)?;
    if shard_files.is_empty() {
        bail!("No shard files found for base: {}", output_base.display());
    }

    let mut records = Vec::new();
    for shard in &shard_files {
        records.extend(store::load_audit(shard)?);
    }
    let total_rows = records.len();
    let records = dedup_keep_last(records);

    let mut summary = CombineSummary {
        shard_files,
        total_rows,
        unique_rows: records.len(),
        correct: 0,
        swapped: 0,
        unknown: 0,
        errors: 0,
        tb_coverage: 0,
        time_coverage: 0,
        surface_coverage: 0,
        court_types: Vec::new(),
        output: combined_path(output_base),
    };
    let mut courts: FxHashMap<String, u64> = FxHashMap::default();
    for record in &records {
        match record.classify().0 {
            AssignmentStatus::Correct => summary.correct += 1,
            AssignmentStatus::Swapped => summary.swapped += 1,
            AssignmentStatus::Unknown => summary.unknown += 1,
            AssignmentStatus::Error => summary.errors += 1,
        }
        let fact = record.page_fact();
        let has_tb = (1..=3u8).any(|set_n| {
            ["home", "away"].iter().any(|side| {
                fact.set_tb(set_n, side).map(str::trim).is_some_and(|v| !v.is_empty())
            })
        });
        if has_tb {
            summary.tb_coverage += 1;
        }
        if fact.time_overall.as_deref().map(str::trim).is_some_and(|v| !v.is_empty()) {
            summary.time_coverage += 1;
        }
        if let Some(court) = fact.court_type.as_deref().map(str::trim) {
            if !court.is_empty() {
                summary.surface_coverage += 1;
                *courts.entry(court.to_string()).or_default() += 1;
            }
        }
    }
    summary.court_types = sorted_by_count(courts);

    store::save_audit(&summary.output, &records)?;
    Ok(summary)
}

/// Outcome of one `apply` run.
#[derive(Debug)]
pub struct ApplySummary {
    pub table_rows: usize,
    pub audit_rows: usize,
    pub report: ApplyReport,
    pub backup: Option<PathBuf>,
}

/// Apply the combined artifact for `output_base` to the table at `input`,
/// rewriting it in place.
pub fn run_apply(input: &Path, output_base: &Path, dry_run: bool) -> Result<ApplySummary> {
    let combined = combined_path(output_base);
    let records = store::load_audit(&combined)?;
    let mut table = store::load_table(input)?;

    let report = apply_audit(&mut table, &records)?;

    let mut backup = None;
    if !dry_run {
        backup = Some(backup_copy(input)?);
        store::save_table(input, &table)?;
    }

    Ok(ApplySummary { table_rows: table.n_rows(), audit_rows: records.len(), report, backup })
}

/// Shard artifacts for a base path: sibling files named
/// `{stem}_shard*.csv`, in name order so later shards win on dedup.
pub fn discover_shards(output_base: &Path) -> Result<Vec<PathBuf>> {
    let dir = match output_base.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let stem = base_stem(output_base)?;
    let prefix = format!("{}_shard", stem);

    let mut shards = Vec::new();
    let entries = std::fs::read_dir(&dir)
        .with_context(|| format!("Failed to list shard directory: {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with(&prefix) && name.ends_with(".csv") {
            shards.push(entry.path());
        }
    }
    shards.sort();
    Ok(shards)
}

/// `{base}_combined.csv`, next to the base path.
pub fn combined_path(output_base: &Path) -> PathBuf {
    output_base.with_file_name(format!(
        "{}_combined.csv",
        base_stem(output_base).unwrap_or_else(|_| "audit".to_string())
    ))
}

fn base_stem(output_base: &Path) -> Result<String> {
    output_base
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.trim_end_matches(".csv").to_string())
        .with_context(|| format!("Bad output base: {}", output_base.display()))
}

/// Copy `path` to a timestamped sibling before it is overwritten.
fn backup_copy(path: &Path) -> Result<PathBuf> {
    let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let target = backup_path(path, &stamp.to_string());
    std::fs::copy(path, &target)
        .with_context(|| format!("Failed to back up {} to {}", path.display(), target.display()))?;
    log::info!("backed up {} to {}", path.display(), target.display());
    Ok(target)
}

/// `{stem}_backup_{stamp}.csv`, next to the original.
pub fn backup_path(path: &Path, stamp: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table");
    path.with_file_name(format!("{}_backup_{}.csv", stem, stamp))
}

fn sorted_by_count(counts: FxHashMap<String, u64>) -> Vec<(String, u64)> {
    let mut out: Vec<(String, u64)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}
