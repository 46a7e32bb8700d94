use chrono::{DateTime, FixedOffset};

/// Aggregate added/deleted line counts for one diff or snapshot.
///
/// Produced by the numstat parser and consumed by the ledger; binary files
/// and other uncountable entries contribute nothing to either field.
///
/// # Examples
///
/// ```
/// use telltale_core::ChangeStats;
///
/// let stats = ChangeStats { added: 12, deleted: 4 };
/// assert_eq!(stats.churn(), 16);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeStats {
    /// Lines added across all counted files.
    pub added: u64,
    /// Lines deleted across all counted files.
    pub deleted: u64,
}

impl ChangeStats {
    /// Total lines touched: added plus deleted.
    pub fn churn(&self) -> u64 {
        self.added + self.deleted
    }
}

/// One commit's reconstructed size record.
///
/// Records are produced oldest-first and each `total` is derived from the
/// predecessor's, so the sequence forms a strict dependency chain: a
/// miscount in one record carries into every later one.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use telltale_core::CommitRecord;
///
/// let record = CommitRecord {
///     id: "4f5a6b7c8d9e0f1a2b3c".into(),
///     timestamp: DateTime::parse_from_str(
///         "2024-03-01 10:11:12 +0100",
///         "%Y-%m-%d %H:%M:%S %z",
///     )
///     .unwrap(),
///     changed: 70,
///     percent_change: Some(70.0),
///     total: 150,
/// };
/// assert_eq!(record.short_id(), "4f5a6b7c8d");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRecord {
    /// Full commit identifier. Rendering truncates it; lookups never do.
    pub id: String,
    /// Commit creation time as recorded by the VCS, timezone included.
    pub timestamp: DateTime<FixedOffset>,
    /// Lines touched relative to the predecessor. For the first commit this
    /// is the line count of the whole initial snapshot.
    pub changed: u64,
    /// `changed` as a percentage of the predecessor's total. `None` for the
    /// first commit and whenever the predecessor's total is not positive.
    pub percent_change: Option<f64>,
    /// Running line count after this commit. Carried unclamped, so rename
    /// miscounts can drift it to zero or below.
    pub total: i64,
}

impl CommitRecord {
    /// Identifier truncated for display (first 10 characters of a hex id).
    /// An id that cannot be cut cleanly at byte 10 renders whole.
    pub fn short_id(&self) -> &str {
        self.id.get(..10).unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> CommitRecord {
        CommitRecord {
            id: id.into(),
            timestamp: DateTime::parse_from_str(
                "2024-01-02 03:04:05 +0000",
                "%Y-%m-%d %H:%M:%S %z",
            )
            .unwrap(),
            changed: 10,
            percent_change: None,
            total: 10,
        }
    }

    #[test]
    fn churn_sums_both_directions() {
        let stats = ChangeStats {
            added: 60,
            deleted: 10,
        };
        assert_eq!(stats.churn(), 70);
        assert_eq!(ChangeStats::default().churn(), 0);
    }

    #[test]
    fn short_id_truncates_long_identifiers() {
        let rec = record("0123456789abcdef0123456789abcdef01234567");
        assert_eq!(rec.short_id(), "0123456789");
    }

    #[test]
    fn short_id_keeps_short_identifiers_whole() {
        let rec = record("abc123");
        assert_eq!(rec.short_id(), "abc123");
    }

    #[test]
    fn short_id_never_splits_a_multibyte_identifier() {
        // Four euro signs span 12 bytes with no boundary at byte 10.
        let rec = record("€€€€");
        assert_eq!(rec.short_id(), "€€€€");
    }

    #[test]
    fn timestamp_round_trips_through_display_format() {
        let rec = record("abc123");
        let rendered = rec.timestamp.format("%Y-%m-%d %H:%M:%S %z").to_string();
        assert_eq!(rendered, "2024-01-02 03:04:05 +0000");
    }
}
