//! Rendered churn analysis: the commit grid and the run statistics table.

use std::fmt;

use telltale_core::CommitRecord;
use telltale_gitlog::source::GIT_DATE_FORMAT;

use crate::classify::Contribution;
use crate::stats::DistributionSummary;

const GRID_HEADERS: [&str; 6] = [
    "Commit",
    "Date",
    "Lines Changed",
    "% Change",
    "Total Lines",
    "Contribution Type",
];

// Count columns are right-aligned, everything else reads left to right.
const GRID_ALIGNS: [Align; 6] = [
    Align::Left,
    Align::Left,
    Align::Right,
    Align::Left,
    Align::Right,
    Align::Left,
];

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

/// A fully labelled history plus the distribution it was judged against.
///
/// Labelling happens once, at construction: the summary is computed from
/// the complete record list and every commit is then classified against
/// that one summary. Building a second report from the same records yields
/// identical labels.
///
/// The `Display` impl renders the whole terminal payload: a bordered table
/// of per-commit rows followed by a statistics block.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use telltale_churn::report::AnalysisReport;
/// use telltale_core::CommitRecord;
///
/// let record = CommitRecord {
///     id: "0a1b2c3d4e5f".into(),
///     timestamp: DateTime::parse_from_str(
///         "2024-05-06 07:08:09 +0000",
///         "%Y-%m-%d %H:%M:%S %z",
///     )
///     .unwrap(),
///     changed: 42,
///     percent_change: None,
///     total: 42,
/// };
/// let report = AnalysisReport::new(vec![record]);
/// assert!(report.to_string().contains("Repository Statistics:"));
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    records: Vec<CommitRecord>,
    labels: Vec<Contribution>,
    summary: DistributionSummary,
}

impl AnalysisReport {
    /// Label a full history.
    pub fn new(records: Vec<CommitRecord>) -> Self {
        let summary = DistributionSummary::from_records(&records);
        let labels = records
            .iter()
            .map(|record| Contribution::classify(record.changed, record.total, &summary))
            .collect();
        Self {
            records,
            labels,
            summary,
        }
    }

    /// The commit records, oldest first.
    pub fn records(&self) -> &[CommitRecord] {
        &self.records
    }

    /// One verdict per record, in record order.
    pub fn labels(&self) -> &[Contribution] {
        &self.labels
    }

    /// The run-wide distribution the verdicts were drawn from.
    pub fn summary(&self) -> &DistributionSummary {
        &self.summary
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<[String; 6]> = self
            .records
            .iter()
            .zip(&self.labels)
            .map(|(record, label)| grid_row(record, *label))
            .collect();

        let mut widths: [usize; 6] = GRID_HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        write_rule(f, &widths, "-")?;
        write_grid_row(f, &widths, &GRID_HEADERS)?;
        write_rule(f, &widths, "=")?;
        for row in &rows {
            write_grid_row(f, &widths, row)?;
            write_rule(f, &widths, "-")?;
        }
        // An empty history still gets a closed frame under the header.
        if rows.is_empty() {
            write_rule(f, &widths, "-")?;
        }

        writeln!(f)?;
        writeln!(f, "Repository Statistics:")?;
        writeln!(f, "{}", "-".repeat(50))?;
        write_summary(f, &self.summary)
    }
}

fn grid_row(record: &CommitRecord, label: Contribution) -> [String; 6] {
    let pct = match record.percent_change {
        Some(p) => format!("{p:.2}%"),
        None => "N/A".to_string(),
    };
    [
        record.short_id().to_string(),
        record.timestamp.format(GIT_DATE_FORMAT).to_string(),
        record.changed.to_string(),
        pct,
        record.total.to_string(),
        label.to_string(),
    ]
}

fn write_rule(f: &mut fmt::Formatter<'_>, widths: &[usize; 6], fill: &str) -> fmt::Result {
    for width in widths {
        write!(f, "+{}", fill.repeat(width + 2))?;
    }
    writeln!(f, "+")
}

fn write_grid_row(
    f: &mut fmt::Formatter<'_>,
    widths: &[usize; 6],
    cells: &[impl AsRef<str>; 6],
) -> fmt::Result {
    for ((cell, width), align) in cells.iter().zip(widths).zip(GRID_ALIGNS) {
        let cell = cell.as_ref();
        match align {
            Align::Left => write!(f, "| {cell:<width$} ", width = *width)?,
            Align::Right => write!(f, "| {cell:>width$} ", width = *width)?,
        }
    }
    writeln!(f, "|")
}

fn write_summary(f: &mut fmt::Formatter<'_>, summary: &DistributionSummary) -> fmt::Result {
    let rows = [
        (
            "Changes per commit (mean)",
            format!("{:.2}", summary.changes_mean),
        ),
        (
            "Changes per commit (median)",
            format!("{:.2}", summary.changes_median),
        ),
        (
            "Changes standard deviation",
            format!("{:.2}", summary.changes_std),
        ),
        (
            "Percentage change (mean)",
            format!("{:.2}%", summary.pct_mean),
        ),
        (
            "Percentage change (std)",
            format!("{:.2}%", summary.pct_std),
        ),
        (
            "Percentage Q1 (25th percentile)",
            format!("{:.2}%", summary.pct_q1),
        ),
        (
            "Percentage Q3 (75th percentile)",
            format!("{:.2}%", summary.pct_q3),
        ),
        ("Percentage IQR", format!("{:.2}%", summary.pct_iqr)),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    write_summary_rule(f, label_width, value_width)?;
    for (label, value) in &rows {
        // The value column never carries trailing padding.
        writeln!(f, "{label:<label_width$}  {value}")?;
    }
    write_summary_rule(f, label_width, value_width)
}

fn write_summary_rule(
    f: &mut fmt::Formatter<'_>,
    label_width: usize,
    value_width: usize,
) -> fmt::Result {
    writeln!(f, "{}  {}", "-".repeat(label_width), "-".repeat(value_width))
}
