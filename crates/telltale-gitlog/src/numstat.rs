//! Tab-separated numstat parsing.
//!
//! `git show --numstat` and `git diff --numstat` emit one line per file:
//! `<added>\t<deleted>\t<path>`. Binary files carry `-` placeholders, and
//! `git show` mixes commit headers and message text into the same stream.
//! Anything that is not a pair of counts is skipped, never an error.

use telltale_core::ChangeStats;

/// Outcome of reading a single numstat line.
///
/// # Examples
///
/// ```
/// use telltale_gitlog::numstat::NumstatLine;
///
/// assert_eq!(
///     NumstatLine::read("3\t1\tsrc/lib.rs"),
///     NumstatLine::Counted {
///         added: 3,
///         deleted: 1
///     }
/// );
/// assert_eq!(NumstatLine::read("-\t-\tlogo.png"), NumstatLine::Skipped);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumstatLine {
    /// A per-file count pair.
    Counted {
        /// Lines added in this file.
        added: u64,
        /// Lines deleted in this file.
        deleted: u64,
    },
    /// Binary marker, header noise, or anything else without two counts.
    Skipped,
}

impl NumstatLine {
    /// Classify one line of numstat output.
    pub fn read(line: &str) -> Self {
        let mut fields = line.split('\t');
        match (
            fields.next().and_then(parse_count),
            fields.next().and_then(parse_count),
        ) {
            (Some(added), Some(deleted)) => NumstatLine::Counted { added, deleted },
            _ => NumstatLine::Skipped,
        }
    }
}

// Digits only: rejects the `-` binary marker, signs, and embedded spaces.
fn parse_count(field: &str) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Sum the counted lines of a numstat stream into one [`ChangeStats`].
///
/// Skipped lines contribute nothing, so malformed input can only shrink the
/// totals; it never fails the parse.
///
/// # Examples
///
/// ```
/// use telltale_gitlog::numstat::parse_numstat;
///
/// let stats = parse_numstat("3\t1\tfoo.py\n-\t-\tbinary.png\n5\t0\tbar.py");
/// assert_eq!((stats.added, stats.deleted), (8, 1));
/// ```
pub fn parse_numstat(output: &str) -> ChangeStats {
    output
        .lines()
        .fold(ChangeStats::default(), |mut acc, line| {
            if let NumstatLine::Counted { added, deleted } = NumstatLine::read(line) {
                acc.added += added;
                acc.deleted += deleted;
            }
            acc
        })
}
