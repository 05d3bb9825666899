use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::entry::{Entry, EntryKind};
use crate::error::ScanError;
use crate::order::{order, OrderingPolicy};
use crate::results::{Results, ScanStats};
use crate::traits::{Matcher, Source};

// ---------------------------------------------------------------------------
// WalkConfig
// ---------------------------------------------------------------------------

/// Traversal parameters handed to every [`Source`].
///
/// Callers configure these via the builder methods (`.threads()`,
/// `.max_depth()`).
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Worker threads for parallel sources. Sequential sources ignore it.
    pub threads:   usize,

    /// Maximum depth below the root; `None` walks everything.
    pub max_depth: Option<usize>,
}

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the builder to `run()`.
pub(crate) struct EngineOptions {
    pub config:         WalkConfig,
    pub source:         Box<dyn Source>,
    pub matcher:        Arc<dyn Matcher>,
    pub ordering:       OrderingPolicy,
    pub collect_errors: bool,
    /// Errors found while configuring (rejected globs), reported first.
    pub setup_errors:   Vec<ScanError>,
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Walk the source, collect every match, then order them.
///
/// Called by `ScanBuilder::run()` after the pattern set compiled. Never fails:
/// traversal errors are absorbed per subtree and a failure at the root is
/// returned in [`Results::root_error`].
pub(crate) fn run(opts: EngineOptions) -> Results {
    let root = opts.source.root().map(Path::to_path_buf);

    // Shared state across traversal units
    let files      = AtomicUsize::new(0);
    let dirs       = AtomicUsize::new(0);
    let errors     = Mutex::new(opts.setup_errors);
    let root_error = Mutex::new(None::<ScanError>);
    let (tx, rx)   = mpsc::channel::<PathBuf>();

    let start = Instant::now();

    {
        let matcher        = &*opts.matcher;
        let collect_errors = opts.collect_errors;
        let root           = root.as_deref();
        let tx             = &tx;
        let files          = &files;
        let dirs           = &dirs;
        let errors         = &errors;
        let root_error     = &root_error;

        let visit = move |res: Result<Entry, ScanError>| match res {
            Ok(entry) => {
                match entry.kind {
                    EntryKind::Dir => {
                        dirs.fetch_add(1, Ordering::Relaxed);
                        return;
                    }
                    EntryKind::File => {
                        files.fetch_add(1, Ordering::Relaxed);
                    }
                    EntryKind::Symlink | EntryKind::Other => {}
                }

                if matcher.is_match(&entry) {
                    // The receiver outlives the walk; a send cannot fail here.
                    let _ = tx.send(entry.path);
                }
            }
            Err(err) => {
                let at_root = !matches!(err, ScanError::Fault(_))
                    && root.is_some_and(|r| err.path() == Some(r));

                if at_root {
                    warn!(error = %err, "cannot open scan root");
                    if let Ok(mut slot) = root_error.lock() {
                        if slot.is_none() {
                            *slot = Some(err);
                        }
                    }
                    return;
                }

                debug!(error = %err, "skipping unreadable entry");
                if collect_errors {
                    if let Ok(mut errs) = errors.lock() {
                        errs.push(err);
                    }
                }
            }
        };

        opts.source.walk(&opts.config, &visit);
    }

    // Every traversal unit has joined; drain the queue.
    drop(tx);
    let paths: Vec<PathBuf> = rx.into_iter().collect();

    let duration = start.elapsed();

    let files      = files.load(Ordering::Relaxed);
    let dirs       = dirs.load(Ordering::Relaxed);
    let errors     = errors.into_inner().unwrap_or_default();
    let root_error = root_error.into_inner().unwrap_or_default();

    let paths = order(paths, opts.ordering);
    let stats = ScanStats::compute(files, dirs, duration);

    info!(
        matches = paths.len(),
        files = stats.files,
        dirs = stats.dirs,
        elapsed_ms = duration.as_millis() as u64,
        "scan complete"
    );

    Results {
        matches: paths.len(),
        paths,
        stats,
        errors,
        root_error,
    }
}
