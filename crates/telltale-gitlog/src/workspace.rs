//! Temporary clone workspace.

use std::path::Path;

use telltale_core::Result;
use tempfile::TempDir;

use crate::source::{run_git, GitCli};

/// A repository cloned into a temporary directory.
///
/// The directory lives exactly as long as this value: dropping the
/// workspace removes the clone, on success, error, and panic paths alike,
/// so a run never leaves artifacts behind.
///
/// # Examples
///
/// ```no_run
/// use telltale_gitlog::source::CommitSource;
/// use telltale_gitlog::workspace::CloneWorkspace;
///
/// let workspace = CloneWorkspace::clone("https://github.com/user/repo.git").unwrap();
/// let commits = workspace.git().list_commits().unwrap();
/// println!("{} commits", commits.len());
/// ```
#[derive(Debug)]
pub struct CloneWorkspace {
    dir: TempDir,
}

impl CloneWorkspace {
    /// Clone `source` (a git URL or local path) into a fresh temporary
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns a git error when the clone exits non-zero, and an I/O error
    /// when the temporary directory cannot be created or `git` cannot be
    /// spawned.
    pub fn clone(source: &str) -> Result<Self> {
        let dir = TempDir::new()?;
        let target = dir.path().to_string_lossy();
        run_git(None, &["clone", "--quiet", source, target.as_ref()])?;
        Ok(Self { dir })
    }

    /// Path of the cloned repository.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A [`GitCli`] rooted at the clone.
    pub fn git(&self) -> GitCli {
        GitCli::new(self.dir.path())
    }
}
