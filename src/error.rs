use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    // Traversal
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("symlink loop: {}", .0.display())]
    SymlinkLoop(PathBuf),

    #[error("IO error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A traversal unit panicked. Its entry (and subtree, for directories)
    /// contributed nothing.
    #[error("traversal fault at {}", .0.display())]
    Fault(PathBuf),

    // Config
    #[error("invalid regex `{pattern}`")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid glob pattern `{pattern}`")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("invalid thread count: {0}")]
    InvalidThreadCount(usize),

    #[error("no root path or source provided")]
    NoSource,

    // Third-party extensibility
    #[error("source error: {0}")]
    Source(String),
}

impl ScanError {
    /// The path this error occurred at, if applicable.
    /// Callers use this to present "Skipped: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::PermissionDenied(p)
            | Self::NotFound(p)
            | Self::SymlinkLoop(p)
            | Self::Fault(p)
            | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether the scan can continue after this error.
    ///
    /// Recoverable errors are absorbed at the smallest scope: a bad glob drops
    /// that one pattern, a traversal error drops that one subtree. Everything
    /// else is a configuration error and stops the scan before it starts.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied(_)
                | Self::NotFound(_)
                | Self::SymlinkLoop(_)
                | Self::Io { .. }
                | Self::Fault(_)
                | Self::InvalidGlob { .. }
                | Self::Source(_)
        )
    }

    /// Classify an I/O error raised while reading `path`.
    pub(crate) fn from_io(path: PathBuf, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            _ => Self::Io { path, source: err },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_errors_are_classified_by_kind() {
        let denied = ScanError::from_io(
            PathBuf::from("/locked"),
            io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(matches!(denied, ScanError::PermissionDenied(_)));

        let gone = ScanError::from_io(
            PathBuf::from("/gone"),
            io::Error::new(io::ErrorKind::NotFound, "vanished"),
        );
        assert!(matches!(gone, ScanError::NotFound(_)));

        let other = ScanError::from_io(PathBuf::from("/dev/bad"), io::Error::other("bad sector"));
        assert!(matches!(other, ScanError::Io { .. }));
        assert_eq!(other.path(), Some(Path::new("/dev/bad")));
    }

    #[test]
    fn config_errors_are_not_recoverable() {
        let err = regex::Regex::new("(unclosed").unwrap_err();
        let err = ScanError::InvalidRegex {
            pattern: "(unclosed".into(),
            source: err,
        };
        assert!(!err.is_recoverable());
        assert!(err.path().is_none());
        assert!(err.to_string().contains("(unclosed"));

        assert!(!ScanError::InvalidThreadCount(0).is_recoverable());
        assert!(!ScanError::NoSource.is_recoverable());
    }

    #[test]
    fn traversal_errors_are_recoverable() {
        assert!(ScanError::PermissionDenied(PathBuf::from("x")).is_recoverable());
        assert!(ScanError::Fault(PathBuf::from("x")).is_recoverable());
        assert!(ScanError::SymlinkLoop(PathBuf::from("x")).is_recoverable());
    }
}
