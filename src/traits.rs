use std::path::Path;

use crate::engine::WalkConfig;
use crate::entry::Entry;
use crate::error::ScanError;

/// Callback a [`Source`] hands every entry or recoverable error to.
///
/// `Sync` because parallel sources call it from several worker threads at once.
pub type Visit<'a> = dyn Fn(Result<Entry, ScanError>) + Sync + 'a;

/// A traversable tree of named entries.
///
/// The built-in sources are [`ParallelWalker`](crate::ParallelWalker) and
/// [`SequentialWalker`](crate::SequentialWalker). Implement this to scan
/// something else, or to observe exactly when and how often the filesystem is
/// touched.
///
/// # Contract
///
/// - Every entry below the root is passed to `visit` exactly once. The root
///   directory itself is not; a root that is a file is.
/// - Directories are reported with [`EntryKind::Dir`](crate::EntryKind::Dir)
///   so the engine can tell leaves apart.
/// - A directory that cannot be read is reported as one `Err` and its subtree
///   is skipped. Walking continues with its siblings.
/// - `walk` returns only once every entry has been visited.
///
/// # Thread Safety
///
/// `Send + Sync` are required; the builder stores sources as `Box<dyn Source>`.
pub trait Source: Send + Sync {
    /// The path this source starts from. Errors reported at exactly this path
    /// are treated as a root failure rather than a skipped subtree.
    fn root(&self) -> Option<&Path> {
        None
    }

    /// Traverse the source, calling `visit` for each entry.
    fn walk(&self, config: &WalkConfig, visit: &Visit<'_>);
}

/// Determines whether an entry is a match.
///
/// Only leaves (anything that is not a directory) are offered to a matcher.
///
/// # Thread Safety
///
/// `Send + Sync` are required; matchers are shared across threads and called
/// concurrently on different entries.
///
/// # Example
///
/// ```rust
/// use fsift::{Matcher, Entry};
///
/// struct ExtensionMatcher(String);
///
/// impl Matcher for ExtensionMatcher {
///     fn is_match(&self, entry: &Entry) -> bool {
///         entry.path
///             .extension()
///             .map(|e| e.eq_ignore_ascii_case(&self.0))
///             .unwrap_or(false)
///     }
/// }
/// ```
pub trait Matcher: Send + Sync {
    /// Returns `true` if this entry should be included in results.
    fn is_match(&self, entry: &Entry) -> bool;
}
