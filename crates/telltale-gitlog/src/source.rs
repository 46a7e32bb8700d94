//! The commit-history capability surface and its `git` implementation.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, FixedOffset};
use telltale_core::{ChangeStats, Result, TelltaleError};

use crate::numstat::parse_numstat;

/// Timestamp layout of `git show -s --format=%ci`.
///
/// Parsing and re-rendering through this format round-trips byte for byte,
/// so downstream output shows dates exactly as git printed them.
pub const GIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Read access to one repository's linear history.
///
/// The analysis pipeline sees history only through this trait, so it can be
/// driven by in-memory fixtures in tests and by [`GitCli`] in production.
pub trait CommitSource {
    /// Full commit identifiers, oldest first, along the first-parent chain.
    fn list_commits(&self) -> Result<Vec<String>>;

    /// Creation time of one commit, timezone included.
    fn commit_timestamp(&self, id: &str) -> Result<DateTime<FixedOffset>>;

    /// Added/deleted totals for a commit's full tree listing.
    fn snapshot_stats(&self, id: &str) -> Result<ChangeStats>;

    /// Added/deleted totals between two commits.
    fn diff_stats(&self, old: &str, new: &str) -> Result<ChangeStats>;
}

/// [`CommitSource`] backed by the `git` binary.
///
/// Every call is a blocking subprocess invocation against a local
/// repository directory; there are no timeouts and no retries. A non-zero
/// exit surfaces as [`TelltaleError::Git`] carrying the failing subcommand
/// and trimmed stderr.
///
/// # Examples
///
/// ```no_run
/// use telltale_gitlog::source::{CommitSource, GitCli};
///
/// let git = GitCli::new("/path/to/checkout");
/// for id in git.list_commits().unwrap() {
///     println!("{id}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_dir: PathBuf,
}

impl GitCli {
    /// Wrap an existing local repository directory.
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    /// The wrapped repository directory.
    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        run_git(Some(&self.repo_dir), args)
    }

    // A clone with no commits has no resolvable HEAD. That is an empty
    // history, not a failure.
    fn has_head(&self) -> Result<bool> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_dir)
            .args(["rev-parse", "--verify", "--quiet", "HEAD"])
            .output()?;
        Ok(output.status.success())
    }
}

impl CommitSource for GitCli {
    fn list_commits(&self) -> Result<Vec<String>> {
        if !self.has_head()? {
            return Ok(Vec::new());
        }
        let out = self.run(&["rev-list", "--reverse", "--first-parent", "HEAD"])?;
        Ok(out
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }

    fn commit_timestamp(&self, id: &str) -> Result<DateTime<FixedOffset>> {
        let out = self.run(&["show", "-s", "--format=%ci", id])?;
        let raw = out.trim();
        DateTime::parse_from_str(raw, GIT_DATE_FORMAT)
            .map_err(|e| TelltaleError::Parse(format!("bad commit date '{raw}': {e}")))
    }

    fn snapshot_stats(&self, id: &str) -> Result<ChangeStats> {
        Ok(parse_numstat(&self.run(&["show", "--numstat", id])?))
    }

    fn diff_stats(&self, old: &str, new: &str) -> Result<ChangeStats> {
        Ok(parse_numstat(&self.run(&["diff", "--numstat", old, new])?))
    }
}

/// Run one git subcommand and capture stdout.
///
/// Output is decoded lossily: invalid UTF-8 in paths or content is replaced
/// instead of failing the run.
pub(crate) fn run_git(repo_dir: Option<&Path>, args: &[&str]) -> Result<String> {
    let mut cmd = Command::new("git");
    if let Some(dir) = repo_dir {
        cmd.arg("-C").arg(dir);
    }
    let output = cmd.args(args).output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(TelltaleError::Git(format!(
            "git {} failed: {}",
            args.first().copied().unwrap_or(""),
            stderr.trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn git_date_format_parses_ci_output() {
        let parsed = DateTime::parse_from_str("2024-03-01 10:11:12 +0100", GIT_DATE_FORMAT)
            .expect("valid %ci timestamp");
        assert_eq!(parsed.offset().local_minus_utc(), 3600);
        assert_eq!(
            parsed.format(GIT_DATE_FORMAT).to_string(),
            "2024-03-01 10:11:12 +0100"
        );
    }

    #[test]
    fn git_date_format_rejects_noise() {
        assert!(DateTime::parse_from_str("yesterday", GIT_DATE_FORMAT).is_err());
        assert!(DateTime::parse_from_str("2024-03-01", GIT_DATE_FORMAT).is_err());
    }

    #[test]
    fn missing_repo_dir_reports_git_error() {
        let git = GitCli::new("/nonexistent/telltale-test-repo");
        let err = git
            .run(&["rev-parse", "HEAD"])
            .expect_err("should fail outside a repository");
        assert!(matches!(err, TelltaleError::Git(_)));
    }
}
