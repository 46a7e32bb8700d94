/// Errors that can occur across the telltale pipeline.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate converts to a `miette` diagnostic at the
/// boundary.
///
/// # Examples
///
/// ```
/// use telltale_core::TelltaleError;
///
/// let err = TelltaleError::Git("clone exited with status 128".into());
/// assert!(err.to_string().contains("status 128"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum TelltaleError {
    /// Filesystem or subprocess I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Git invocation failure (non-zero exit).
    #[error("git error: {0}")]
    Git(String),

    /// Unparseable output from git.
    #[error("parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TelltaleError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn git_error_displays_message() {
        let err = TelltaleError::Git("rev-list failed: bad revision".into());
        assert_eq!(err.to_string(), "git error: rev-list failed: bad revision");
    }

    #[test]
    fn parse_error_displays_message() {
        let err = TelltaleError::Parse("bad commit date 'yesterday'".into());
        assert_eq!(err.to_string(), "parse error: bad commit date 'yesterday'");
    }
}
