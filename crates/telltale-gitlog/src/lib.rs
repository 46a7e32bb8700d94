//! Repository acquisition and raw change-statistics extraction.
//!
//! Clones a repository into a temporary workspace and drives the `git`
//! binary to enumerate linear history and collect per-commit numstat
//! totals. Downstream analysis consumes the [`source::CommitSource`]
//! capability only, so nothing above this crate touches git directly.

pub mod numstat;
pub mod source;
pub mod workspace;
