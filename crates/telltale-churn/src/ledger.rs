//! Running line-count ledger across a linear history.
//!
//! Each record's `total` derives from the predecessor's, so the walk is a
//! fold: state in, state and record out. The carried state is threaded
//! explicitly through [`LedgerState::advance`] rather than kept in ambient
//! variables, which keeps the step a pure function.

use chrono::{DateTime, FixedOffset};
use telltale_core::{ChangeStats, CommitRecord, Result};
use telltale_gitlog::source::CommitSource;

/// One commit's raw inputs to the ledger.
#[derive(Debug, Clone)]
pub struct Observation {
    /// Full commit identifier.
    pub id: String,
    /// Commit creation time.
    pub timestamp: DateTime<FixedOffset>,
    /// Counted lines for this step: the whole-tree listing for the first
    /// commit, the diff against the predecessor for every later one.
    pub stats: ChangeStats,
}

/// Ledger state carried from one commit to the next.
///
/// Starts empty; after a fold it holds the folded commit's identifier and
/// reconstructed total, which the next step builds on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerState {
    prev: Option<(String, i64)>,
}

impl LedgerState {
    /// Identifier of the last folded commit, if any.
    pub fn prev_commit(&self) -> Option<&str> {
        self.prev.as_ref().map(|(id, _)| id.as_str())
    }

    /// Fold one observation into the ledger.
    ///
    /// The first observation seeds the total from its own added count; every
    /// later one applies `added - deleted` as a delta. The total is carried
    /// unclamped. The percentage change is defined only when the carried
    /// total is strictly positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::DateTime;
    /// use telltale_churn::ledger::{LedgerState, Observation};
    /// use telltale_core::ChangeStats;
    ///
    /// let first = Observation {
    ///     id: "c0".into(),
    ///     timestamp: DateTime::parse_from_str(
    ///         "2024-01-01 00:00:00 +0000",
    ///         "%Y-%m-%d %H:%M:%S %z",
    ///     )
    ///     .unwrap(),
    ///     stats: ChangeStats {
    ///         added: 100,
    ///         deleted: 0,
    ///     },
    /// };
    /// let (state, record) = LedgerState::default().advance(first);
    /// assert_eq!(record.total, 100);
    /// assert_eq!(record.percent_change, None);
    /// assert_eq!(state.prev_commit(), Some("c0"));
    /// ```
    pub fn advance(self, observation: Observation) -> (LedgerState, CommitRecord) {
        let changed = observation.stats.churn();
        let (total, percent_change) = match self.prev {
            None => (observation.stats.added as i64, None),
            Some((_, prev_total)) => {
                let total =
                    prev_total + observation.stats.added as i64 - observation.stats.deleted as i64;
                let pct = (prev_total > 0).then(|| changed as f64 / prev_total as f64 * 100.0);
                (total, pct)
            }
        };
        let state = LedgerState {
            prev: Some((observation.id.clone(), total)),
        };
        let record = CommitRecord {
            id: observation.id,
            timestamp: observation.timestamp,
            changed,
            percent_change,
            total,
        };
        (state, record)
    }
}

/// Sequence an already-listed history into records.
///
/// Fetches the timestamp and the appropriate stats for each commit (the
/// whole-tree snapshot for the first, the diff against the predecessor for
/// the rest) and folds them through [`LedgerState::advance`]. Fails on the
/// first source error; no partial record list survives a failure.
///
/// # Errors
///
/// Propagates any error from the underlying [`CommitSource`].
pub fn sequence_commits<S: CommitSource>(
    source: &S,
    commits: Vec<String>,
) -> Result<Vec<CommitRecord>> {
    let mut records = Vec::with_capacity(commits.len());
    let mut state = LedgerState::default();

    for id in commits {
        let timestamp = source.commit_timestamp(&id)?;
        let stats = match state.prev_commit() {
            None => source.snapshot_stats(&id)?,
            Some(prev) => source.diff_stats(prev, &id)?,
        };
        let (next, record) = state.advance(Observation {
            id,
            timestamp,
            stats,
        });
        state = next;
        records.push(record);
    }

    Ok(records)
}

/// List a source's history and sequence it into records.
///
/// # Errors
///
/// Propagates any error from the underlying [`CommitSource`].
pub fn sequence_history<S: CommitSource>(source: &S) -> Result<Vec<CommitRecord>> {
    let commits = source.list_commits()?;
    sequence_commits(source, commits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use telltale_core::TelltaleError;

    fn ts(raw: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z").unwrap()
    }

    fn observe(id: &str, added: u64, deleted: u64) -> Observation {
        Observation {
            id: id.into(),
            timestamp: ts("2024-01-02 03:04:05 +0000"),
            stats: ChangeStats { added, deleted },
        }
    }

    fn carried(id: &str, total: i64) -> LedgerState {
        LedgerState {
            prev: Some((id.into(), total)),
        }
    }

    #[test]
    fn first_observation_seeds_total_from_added() {
        let (state, record) = LedgerState::default().advance(observe("c0", 100, 0));
        assert_eq!(record.changed, 100);
        assert_eq!(record.total, 100);
        assert_eq!(record.percent_change, None);
        assert_eq!(state, carried("c0", 100));
    }

    #[test]
    fn first_observation_counts_deletions_in_changed_only() {
        let (_, record) = LedgerState::default().advance(observe("c0", 5, 2));
        assert_eq!(record.changed, 7);
        assert_eq!(record.total, 5);
    }

    #[test]
    fn later_observation_applies_delta_and_percent() {
        let (next, record) = carried("c0", 100).advance(observe("c1", 60, 10));
        assert_eq!(record.changed, 70);
        assert_eq!(record.total, 150);
        let pct = record.percent_change.expect("defined percent");
        assert!((pct - 70.0).abs() < 1e-9);
        assert_eq!(next, carried("c1", 150));
    }

    #[test]
    fn percent_undefined_when_carried_total_not_positive() {
        let (_, record) = carried("c0", 0).advance(observe("c1", 5, 0));
        assert_eq!(record.percent_change, None);
        assert_eq!(record.total, 5);

        let (_, record) = carried("c0", -3).advance(observe("c1", 5, 0));
        assert_eq!(record.percent_change, None);
        assert_eq!(record.total, 2);
    }

    #[test]
    fn empty_diff_keeps_total_and_yields_zero_percent() {
        let (_, record) = carried("c0", 50).advance(observe("c1", 0, 0));
        assert_eq!(record.changed, 0);
        assert_eq!(record.total, 50);
        assert_eq!(record.percent_change, Some(0.0));
    }

    #[test]
    fn total_can_drift_negative() {
        let (next, record) = carried("c0", 2).advance(observe("c1", 0, 10));
        assert_eq!(record.total, -8);
        assert_eq!(record.percent_change, Some(500.0));
        assert_eq!(next, carried("c1", -8));
    }

    struct FixtureSource {
        commits: Vec<String>,
        snapshot: ChangeStats,
        diffs: Vec<ChangeStats>,
        fail_diffs: bool,
    }

    impl FixtureSource {
        fn index_of(&self, id: &str) -> usize {
            self.commits
                .iter()
                .position(|c| c == id)
                .expect("known commit id")
        }
    }

    impl CommitSource for FixtureSource {
        fn list_commits(&self) -> Result<Vec<String>> {
            Ok(self.commits.clone())
        }

        fn commit_timestamp(&self, id: &str) -> Result<DateTime<FixedOffset>> {
            let day = self.index_of(id) + 1;
            Ok(ts(&format!("2024-01-{day:02} 00:00:00 +0000")))
        }

        fn snapshot_stats(&self, id: &str) -> Result<ChangeStats> {
            assert_eq!(self.index_of(id), 0, "snapshot is for the first commit");
            Ok(self.snapshot)
        }

        fn diff_stats(&self, old: &str, new: &str) -> Result<ChangeStats> {
            if self.fail_diffs {
                return Err(TelltaleError::Git("diff failed".into()));
            }
            let old_idx = self.index_of(old);
            assert_eq!(self.index_of(new), old_idx + 1, "diffs walk consecutively");
            Ok(self.diffs[old_idx])
        }
    }

    #[test]
    fn sequences_snapshot_then_consecutive_diffs() {
        let source = FixtureSource {
            commits: vec!["c0".into(), "c1".into(), "c2".into()],
            snapshot: ChangeStats {
                added: 100,
                deleted: 0,
            },
            diffs: vec![
                ChangeStats {
                    added: 60,
                    deleted: 10,
                },
                ChangeStats {
                    added: 460,
                    deleted: 10,
                },
            ],
            fail_diffs: false,
        };

        let records = sequence_history(&source).expect("sequence");
        assert_eq!(records.len(), 3);

        let totals: Vec<i64> = records.iter().map(|r| r.total).collect();
        assert_eq!(totals, vec![100, 150, 600]);

        let changed: Vec<u64> = records.iter().map(|r| r.changed).collect();
        assert_eq!(changed, vec![100, 70, 470]);

        assert_eq!(records[0].percent_change, None);
        let p1 = records[1].percent_change.expect("defined");
        assert!((p1 - 70.0).abs() < 1e-9);
        let p2 = records[2].percent_change.expect("defined");
        assert!((p2 - 470.0 / 150.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_history_sequences_to_no_records() {
        let source = FixtureSource {
            commits: Vec::new(),
            snapshot: ChangeStats::default(),
            diffs: Vec::new(),
            fail_diffs: false,
        };
        let records = sequence_history(&source).expect("sequence");
        assert!(records.is_empty());
    }

    #[test]
    fn source_failure_aborts_with_no_records() {
        let source = FixtureSource {
            commits: vec!["c0".into(), "c1".into()],
            snapshot: ChangeStats {
                added: 10,
                deleted: 0,
            },
            diffs: Vec::new(),
            fail_diffs: true,
        };
        let err = sequence_history(&source).expect_err("diff failure propagates");
        assert!(err.to_string().contains("diff failed"));
    }
}
