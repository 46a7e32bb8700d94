//! Core types and error handling for the telltale pipeline.
//!
//! This crate provides the shared foundation used by the other telltale
//! crates:
//! - [`TelltaleError`]: unified error type using `thiserror`
//! - [`ChangeStats`]: aggregate added/deleted line counts for one diff
//! - [`CommitRecord`]: one commit's reconstructed size record

mod error;
mod types;

pub use error::TelltaleError;
pub use types::{ChangeStats, CommitRecord};

/// A convenience `Result` type for telltale operations.
pub type Result<T> = std::result::Result<T, TelltaleError>;
