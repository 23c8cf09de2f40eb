//! # mr_core - Match Record Reconciliation and Cleanup Engines
//!
//! This library cleans a wide per-match CSV table of tennis match records:
//! it reconciles home/away assignments against page-observed ground truth,
//! swaps mislabeled rows, backfills facts the table is missing, and rewrites
//! placeholder zeros as explicit missing values where the score proves the
//! statistic could not exist.
//!
//! ## Engines
//! - Reconciliation: id-first, surname-fallback home/away verdicts
//! - Swap: atomic side exchange across every paired column
//! - Backfill: fill-if-missing merge of page facts
//! - Nullification: seven structural/eligibility rules, idempotent
//!
//! All table mutation is in-memory; [`store`] handles CSV persistence.

pub mod apply;
pub mod audit;
pub mod backfill;
pub mod error;
pub mod nullify;
pub mod pagefact;
pub mod reconcile;
pub mod schema;
pub mod store;
pub mod swap;
pub mod table;

// Re-export the engine entry points
pub use apply::{apply_audit, ApplyReport};
pub use nullify::{nullify, validate, NullifyReport, ValidationReport};

// Re-export the data model
pub use audit::{dedup_keep_last, index_by_uid, AuditRecord};
pub use backfill::BackfillCounters;
pub use error::FixError;
pub use pagefact::PageFact;
pub use reconcile::{classify, AssignmentStatus, MatchMethod, SideIdentity};
pub use swap::SwapPlan;
pub use table::MatchTable;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
