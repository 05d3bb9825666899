use std::path::PathBuf;
use std::time::Duration;

use crate::error::ScanError;

/// The output of a completed scan.
pub struct Results {
    /// Number of matched entries; always `paths.len()`.
    pub matches: usize,

    /// Matched paths in final order. Deterministic for an unchanging tree.
    pub paths: Vec<PathBuf>,

    /// Scan performance statistics.
    pub stats: ScanStats,

    /// Absorbed errors (rejected globs, unreadable subtrees, faulted units).
    /// Only populated if `.collect_errors(true)` was set on the builder.
    pub errors: Vec<ScanError>,

    /// Set when the root itself could not be opened. `paths` is then empty;
    /// the scan still counts as completed.
    pub root_error: Option<ScanError>,
}

/// Counters for a completed scan.
///
/// Only entries the walker handed over are counted. The root directory,
/// symlinks and special files are not.
#[derive(Debug, Clone)]
pub struct ScanStats {
    /// Regular files seen, whether they matched or not.
    pub files: usize,

    /// Directories seen below the root.
    pub dirs: usize,

    /// Time spent walking. Draining and ordering the matches is not included.
    pub duration: Duration,

    /// Files plus directories per second of walking, rounded down. Zero when
    /// the walk finished too fast for the clock to register.
    pub entries_per_sec: usize,
}

impl ScanStats {
    pub(crate) fn compute(files: usize, dirs: usize, duration: Duration) -> Self {
        let secs = duration.as_secs_f64();
        let entries_per_sec = match files + dirs {
            _ if secs <= 0.0 => 0,
            seen => (seen as f64 / secs).floor() as usize,
        };

        Self { files, dirs, duration, entries_per_sec }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_counts_files_and_dirs() {
        let stats = ScanStats::compute(30, 10, Duration::from_millis(500));
        assert_eq!(stats.files, 30);
        assert_eq!(stats.dirs, 10);
        assert_eq!(stats.entries_per_sec, 80);
    }

    #[test]
    fn zero_duration_gives_zero_rate() {
        let stats = ScanStats::compute(5, 1, Duration::ZERO);
        assert_eq!(stats.entries_per_sec, 0);
    }

    #[test]
    fn rate_rounds_down() {
        let stats = ScanStats::compute(2, 0, Duration::from_secs(3));
        assert_eq!(stats.entries_per_sec, 0);
        let stats = ScanStats::compute(7, 0, Duration::from_secs(2));
        assert_eq!(stats.entries_per_sec, 3);
    }
}
