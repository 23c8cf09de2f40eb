//! Match Record CLI
//!
//! CSV repair pipeline: nullify impossible zeros, merge reconciliation
//! shards, apply corrections back onto the match table.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mr_cli")]
#[command(about = "Repair and reconcile match-record CSV tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite structurally impossible zero stats as missing values
    FixNan {
        /// Input match table CSV
        #[arg(long)]
        input: PathBuf,

        /// Output path; omitted means rewrite the input in place (with backup)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Compute and report without writing anything
        #[arg(long, default_value = "false")]
        dry_run: bool,
    },

    /// Merge shard audit files into one combined artifact
    Combine {
        /// Base path the shards were written next to, e.g. data/audit
        #[arg(long)]
        output_base: PathBuf,
    },

    /// Apply a combined audit artifact to the match table (swap + backfill)
    Apply {
        /// Match table CSV to correct in place
        #[arg(long)]
        input: PathBuf,

        /// Base path of the audit artifacts; reads {base}_combined.csv
        #[arg(long)]
        output_base: PathBuf,

        /// Compute and report without writing anything
        #[arg(long, default_value = "false")]
        dry_run: bool,

        /// Write the apply report as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::FixNan { input, output, dry_run } => {
            println!("🧹 Fixing placeholder zeros...");
            println!("   Input: {}", input.display());
            if dry_run {
                println!("   Mode:  dry run (no files written)");
            }

            let summary = mr_cli::run_fix_nan(&input, output.as_deref(), dry_run)?;
            print_fix_nan(&summary);
        }

        Commands::Combine { output_base } => {
            println!("🔗 Combining audit shards...");
            println!("   Base: {}", output_base.display());

            let summary = mr_cli::run_combine(&output_base)?;
            print_combine(&summary);
        }

        Commands::Apply { input, output_base, dry_run, report } => {
            println!("🔧 Applying audit corrections...");
            println!("   Table: {}", input.display());
            println!("   Audit: {}", mr_cli::combined_path(&output_base).display());
            if dry_run {
                println!("   Mode:  dry run (no files written)");
            }

            let summary = mr_cli::run_apply(&input, &output_base, dry_run)?;
            print_apply(&summary);

            if let Some(report_path) = report {
                save_report(&report_path, &summary.report)?;
            }
        }
    }

    Ok(())
}

fn print_fix_nan(summary: &mr_cli::FixNanSummary) {
    println!("\n✅ Nullification complete");
    println!("   Rows:          {}", summary.rows);
    println!("   Stat columns:  {}", summary.stat_columns);
    println!("   Zeros:         {} → {}", summary.zeros_before, summary.zeros_after);
    println!("   Missing:       {} → {}", summary.missing_before, summary.missing_after);

    let r = &summary.report;
    println!("\n   Cells fixed per rule:");
    println!("     set-3 unplayed:       {}", r.s3_unplayed);
    println!("     set-2 unplayed:       {}", r.s2_unplayed);
    println!("     per-set tiebreak:     {}", r.per_set_tiebreak);
    println!("     overall tiebreak:     {}", r.overall_tiebreak);
    println!("     set-1 match point:    {}", r.s1_match_point);
    println!("     set-2 match point:    {}", r.s2_match_point);
    println!("     opportunity gating:   {}", r.opportunity_gated);
    println!("     total:                {}", r.total_fixed());
    if r.nonzero_nulled > 0 {
        println!("   ⚠️  {} non-zero cells were structurally impossible", r.nonzero_nulled);
    }

    let v = &summary.validation;
    if v.is_clean() {
        println!("\n   Validation: clean");
    } else {
        println!("\n   ⚠️  Validation residuals:");
        println!("     set-3 stats in 2-set matches: {}", v.s3_in_two_set_matches);
        println!("     set-1 match points present:   {}", v.s1_match_point_present);
        println!("     overall TB without tiebreak:  {}", v.overall_tb_in_no_tb_matches);
    }

    if let Some(backup) = &summary.backup {
        println!("\n   Backup: {}", backup.display());
    }
}

fn print_combine(summary: &mr_cli::CombineSummary) {
    println!("\n✅ Combined {} shard(s)", summary.shard_files.len());
    for shard in &summary.shard_files {
        println!("   - {}", shard.display());
    }
    println!("   Rows:   {} → {} unique", summary.total_rows, summary.unique_rows);
    println!(
        "   Status: {} correct, {} swapped, {} unknown, {} errors",
        summary.correct, summary.swapped, summary.unknown, summary.errors
    );
    println!(
        "   Coverage: {} TB, {} time, {} surface (of {} rows)",
        summary.tb_coverage, summary.time_coverage, summary.surface_coverage, summary.unique_rows
    );
    if !summary.court_types.is_empty() {
        println!("   Surfaces:");
        for (court, n) in &summary.court_types {
            println!("     {:<10} {}", court, n);
        }
    }
    println!("   Output: {}", summary.output.display());
}

fn print_apply(summary: &mr_cli::ApplySummary) {
    let r = &summary.report;
    println!("\n✅ Apply complete");
    println!("   Table rows:    {}", summary.table_rows);
    println!("   Audit rows:    {}", summary.audit_rows);
    println!("   Matched:       {}", r.matched_rows);
    println!(
        "   Status:        {} correct, {} swapped, {} unknown, {} errors",
        r.correct, r.swapped, r.unknown, r.errors
    );
    if r.swap_skipped > 0 {
        println!("   ⚠️  Swaps skipped (bad score): {}", r.swap_skipped);
    }
    let b = &r.backfill;
    println!(
        "   Backfilled:    {} TB, {} time, {} datetime, {} surface ({} total)",
        b.tb_filled,
        b.time_filled,
        b.datetime_filled,
        b.surface_filled,
        b.total()
    );
    if let Some(backup) = &summary.backup {
        println!("   Backup: {}", backup.display());
    }
}

fn save_report(path: &PathBuf, report: &mr_core::ApplyReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    println!("\n📄 Report saved to: {}", path.display());
    Ok(())
}
