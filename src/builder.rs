use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::engine::{run, EngineOptions, WalkConfig};
use crate::error::ScanError;
use crate::order::OrderingPolicy;
use crate::pattern::{PatternSet, DEFAULT_PATTERNS};
use crate::results::Results;
use crate::traits::{Matcher, Source};
use crate::walker::{ParallelWalker, SequentialWalker};

// ---------------------------------------------------------------------------
// ScanBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a scan.
///
/// Created via [`fsift::scan()`](crate::scan). Configure with chained
/// builder methods, then call [`run()`](ScanBuilder::run) to execute.
///
/// Unless told otherwise the builder uses [`DEFAULT_PATTERNS`], no regex, one
/// worker per logical CPU, and the ordering implied by the pattern list
/// (see [`OrderingPolicy::for_patterns`]).
///
/// # Example
///
/// ```rust,no_run
/// let results = fsift::scan()
///     .root("/srv/share")
///     .patterns(["*.kdbx", "*.key"])
///     .regex("(?i)password")
///     .threads(8)
///     .run()?;
///
/// for path in &results.paths {
///     println!("{}", path.display());
/// }
/// # Ok::<(), fsift::ScanError>(())
/// ```
pub struct ScanBuilder {
    root:           Option<PathBuf>,
    source:         Option<Box<dyn Source>>,
    matcher:        Option<Box<dyn Matcher>>,
    patterns:       Vec<String>,
    regex:          Option<String>,
    ordering:       Option<OrderingPolicy>,
    threads:        usize,
    max_depth:      Option<usize>,
    collect_errors: bool,
}

impl Default for ScanBuilder {
    fn default() -> Self {
        Self {
            root:           None,
            source:         None,
            matcher:        None,
            patterns:       DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            regex:          None,
            ordering:       None,
            threads:        num_cpus(),
            max_depth:      None,
            collect_errors: false,
        }
    }
}

impl ScanBuilder {
    // ── Source ────────────────────────────────────────────────────────────

    /// Scan the filesystem tree at `root`.
    ///
    /// Result paths keep the form of `root`: relative in, relative out.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Scan a custom source instead of the filesystem. Takes precedence over
    /// [`root()`](Self::root).
    pub fn source(mut self, s: impl Source + 'static) -> Self {
        self.source = Some(Box::new(s));
        self
    }

    // ── Match policy ──────────────────────────────────────────────────────

    /// Replace the glob list. An empty list disables glob matching.
    ///
    /// Malformed globs never match and never fail the scan.
    pub fn patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Also match base names against this regular expression. An empty
    /// string means no regex.
    ///
    /// Validated by [`run()`](Self::run) before any traversal.
    pub fn regex(mut self, regex: impl Into<String>) -> Self {
        self.regex = Some(regex.into());
        self
    }

    /// Replace the glob/regex policy with a custom matcher.
    ///
    /// The regex, if any, is still validated, and the ordering default is
    /// still derived from the glob list.
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(Box::new(m));
        self
    }

    /// Force an ordering policy instead of deriving it from the glob list.
    pub fn ordering(mut self, policy: OrderingPolicy) -> Self {
        self.ordering = Some(policy);
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Number of threads to use for traversal.
    ///
    /// Defaults to the number of logical CPU cores. `1` walks on the calling
    /// thread; `0` is rejected by [`run()`](Self::run).
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = n;
        self
    }

    /// Maximum traversal depth. `0` means the root only, `1` means one
    /// level of children, and so on. Unlimited by default.
    pub fn max_depth(mut self, d: usize) -> Self {
        self.max_depth = Some(d);
        self
    }

    /// Collect absorbed errors into [`Results::errors`].
    ///
    /// Disabled by default. Absorbed errors are always logged at `debug`.
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.collect_errors = yes;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Execute the scan and return results.
    ///
    /// Blocks until every traversal unit has finished.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for configuration errors, all detected before the
    /// source is touched: an invalid regex, a thread count of zero, or no
    /// root/source. A root that cannot be opened is not an error; see
    /// [`Results::root_error`].
    pub fn run(self) -> Result<Results, ScanError> {
        if self.threads == 0 {
            return Err(ScanError::InvalidThreadCount(0));
        }

        let set = PatternSet::new(self.patterns, self.regex.as_deref())?;

        let source: Box<dyn Source> = match (self.source, self.root) {
            (Some(s), _) => s,
            (None, Some(root)) if self.threads == 1 => Box::new(SequentialWalker::new(root)),
            (None, Some(root)) => Box::new(ParallelWalker::new(root)),
            (None, None) => return Err(ScanError::NoSource),
        };

        let ordering = self
            .ordering
            .unwrap_or_else(|| OrderingPolicy::for_patterns(set.patterns()));

        let setup_errors = if self.collect_errors {
            set.rejected_errors().collect()
        } else {
            Vec::new()
        };

        debug!(
            patterns = ?set.patterns(),
            regex = ?set.regex().map(|r| r.as_str()),
            ?ordering,
            threads = self.threads,
            "starting scan"
        );

        let matcher: Arc<dyn Matcher> = match self.matcher {
            Some(m) => Arc::from(m),
            None => Arc::new(set),
        };

        let opts = EngineOptions {
            config: WalkConfig {
                threads:   self.threads,
                max_depth: self.max_depth,
            },
            source,
            matcher,
            ordering,
            collect_errors: self.collect_errors,
            setup_errors,
        };

        Ok(run(opts))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Get the logical CPU count, with a safe fallback.
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
