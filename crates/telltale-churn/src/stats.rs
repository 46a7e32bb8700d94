//! Run-wide distribution statistics over commit records.

use telltale_core::CommitRecord;

/// Summary statistics for one full analysis run.
///
/// Computed exactly once from the complete record list, never updated
/// incrementally. The percentage fields describe only the records with a
/// defined `percent_change`, so the first commit never contributes to them.
/// Because the entire run feeds a single summary, early commits end up
/// measured against a distribution that includes commits made after them;
/// that asymmetry is part of the heuristic's contract.
///
/// # Examples
///
/// ```
/// use telltale_churn::stats::DistributionSummary;
///
/// let summary = DistributionSummary::from_records(&[]);
/// assert_eq!(summary, DistributionSummary::default());
/// assert_eq!(summary.pct_samples, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistributionSummary {
    /// Mean of per-commit changed-line counts.
    pub changes_mean: f64,
    /// Median of per-commit changed-line counts.
    pub changes_median: f64,
    /// Sample standard deviation of changed-line counts.
    pub changes_std: f64,
    /// Mean of the defined percentage changes.
    pub pct_mean: f64,
    /// Sample standard deviation of the defined percentage changes.
    pub pct_std: f64,
    /// 25th percentile of the defined percentage changes.
    pub pct_q1: f64,
    /// 75th percentile of the defined percentage changes.
    pub pct_q3: f64,
    /// `pct_q3 - pct_q1`.
    pub pct_iqr: f64,
    /// How many records had a defined percentage change.
    pub pct_samples: usize,
}

impl DistributionSummary {
    /// Summarize a full record list.
    ///
    /// An empty list yields the all-zero default. With no defined
    /// percentage changes the percentage fields stay zero and
    /// `pct_samples` records that nothing fed them.
    pub fn from_records(records: &[CommitRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let changes: Vec<f64> = records.iter().map(|r| r.changed as f64).collect();
        let pcts: Vec<f64> = records.iter().filter_map(|r| r.percent_change).collect();

        let mut sorted_changes = changes.clone();
        sorted_changes.sort_by(f64::total_cmp);
        let mut sorted_pcts = pcts.clone();
        sorted_pcts.sort_by(f64::total_cmp);

        let q1 = percentile(&sorted_pcts, 25.0);
        let q3 = percentile(&sorted_pcts, 75.0);

        Self {
            changes_mean: mean(&changes),
            changes_median: percentile(&sorted_changes, 50.0),
            changes_std: sample_std(&changes),
            pct_mean: mean(&pcts),
            pct_std: sample_std(&pcts),
            pct_q1: q1,
            pct_q3: q3,
            pct_iqr: q3 - q1,
            pct_samples: pcts.len(),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

// Sample (n - 1) form; zero when there is nothing to spread.
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Percentile by linear interpolation between adjacent order statistics.
///
/// The input must already be sorted. The same interpolation serves the
/// median and both quartiles, which keeps reruns reproducible.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let index = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = index - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}
