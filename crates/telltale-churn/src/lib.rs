//! Commit-size analysis: ledger reconstruction, distribution statistics,
//! outlier classification, and report rendering.
//!
//! Consumes a [`telltale_gitlog::source::CommitSource`] and produces the
//! ordered per-commit records, the run-wide distribution summary, and the
//! rendered report tables.

pub mod classify;
pub mod ledger;
pub mod report;
pub mod stats;
