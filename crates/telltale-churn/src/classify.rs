//! Outlier labelling for individual commits.

use std::fmt;

use crate::stats::DistributionSummary;

/// Verdict attached to one commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contribution {
    /// No percentage distribution existed to judge against.
    NotApplicable,
    /// The commit rewrote far more of the repository than its peers.
    LikelyAi,
    /// The commit sits past the mild-outlier fence but short of extreme.
    PossibleAi,
    /// The commit is within the repository's normal churn range.
    LikelyHuman,
}

impl Contribution {
    /// Label one commit against the run-wide percentage distribution.
    ///
    /// The commit's size is expressed as a percentage of its own post-commit
    /// total, then compared to the upper Tukey fence: more than three IQRs
    /// above Q3 reads as likely AI, more than one and a half as possible AI.
    /// A non-positive total contributes a zero percentage rather than a
    /// division error, and a degenerate distribution (IQR of zero) flags
    /// nobody.
    ///
    /// # Examples
    ///
    /// ```
    /// use telltale_churn::classify::Contribution;
    /// use telltale_churn::stats::DistributionSummary;
    ///
    /// let summary = DistributionSummary {
    ///     pct_q3: 10.0,
    ///     pct_iqr: 4.0,
    ///     pct_samples: 5,
    ///     ..DistributionSummary::default()
    /// };
    /// assert_eq!(
    ///     Contribution::classify(23, 100, &summary),
    ///     Contribution::LikelyAi
    /// );
    /// assert_eq!(
    ///     Contribution::classify(10, 100, &summary),
    ///     Contribution::LikelyHuman
    /// );
    /// ```
    pub fn classify(changed: u64, total: i64, summary: &DistributionSummary) -> Self {
        if summary.pct_samples == 0 {
            return Contribution::NotApplicable;
        }

        let pct = if total > 0 {
            changed as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        if summary.pct_iqr <= 0.0 {
            return Contribution::LikelyHuman;
        }

        let excess = (pct - summary.pct_q3) / summary.pct_iqr;
        if excess > 3.0 {
            Contribution::LikelyAi
        } else if excess > 1.5 {
            Contribution::PossibleAi
        } else {
            Contribution::LikelyHuman
        }
    }
}

impl fmt::Display for Contribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Contribution::NotApplicable => "N/A",
            Contribution::LikelyAi => "Likely AI",
            Contribution::PossibleAi => "Possible AI",
            Contribution::LikelyHuman => "Likely Human",
        };
        f.write_str(label)
    }
}
