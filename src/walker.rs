//! Filesystem sources.
//!
//! Two interchangeable walkers with identical observable output: a bounded
//! parallel one built on `ignore`, and a single-threaded one built on
//! `walkdir`. Neither follows symlinks, so cycles cannot occur; a symlink is a
//! leaf tested by name like any file.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use ignore::{WalkBuilder, WalkState};
use tracing::warn;
use walkdir::WalkDir;

use crate::engine::WalkConfig;
use crate::entry::{Entry, EntryKind};
use crate::error::ScanError;
use crate::traits::{Source, Visit};

// ---------------------------------------------------------------------------
// ParallelWalker
// ---------------------------------------------------------------------------

/// Parallel traversal over a fixed pool of `config.threads` workers.
///
/// Each directory read is a unit of work on the pool's queue; the call
/// returns once the pool drains.
#[derive(Debug, Clone)]
pub struct ParallelWalker {
    root: PathBuf,
}

impl ParallelWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Source for ParallelWalker {
    fn root(&self) -> Option<&Path> {
        Some(&self.root)
    }

    fn walk(&self, config: &WalkConfig, visit: &Visit<'_>) {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .ignore(false)
            .parents(false)
            .hidden(false)
            .follow_links(false)
            .same_file_system(false)
            .threads(config.threads);

        if let Some(depth) = config.max_depth {
            builder.max_depth(Some(depth));
        }

        builder.build_parallel().run(|| {
            Box::new(move |res: Result<ignore::DirEntry, ignore::Error>| -> WalkState {
                let dent = match res {
                    Ok(e) => e,
                    Err(e) => {
                        visit(Err(map_ignore_error(e)));
                        return WalkState::Continue;
                    }
                };

                let ft = match dent.file_type() {
                    Some(ft) => ft,
                    None => return WalkState::Continue,
                };

                let kind = EntryKind::from_file_type(ft);
                if dent.depth() == 0 && kind == EntryKind::Dir {
                    return WalkState::Continue;
                }

                let entry = Entry {
                    path: dent.path().to_path_buf(),
                    name: dent.file_name().to_string_lossy().into_owned(),
                    kind,
                    depth: dent.depth(),
                };

                if visit_unit(visit, entry) || kind != EntryKind::Dir {
                    WalkState::Continue
                } else {
                    WalkState::Skip
                }
            })
        });
    }
}

// ---------------------------------------------------------------------------
// SequentialWalker
// ---------------------------------------------------------------------------

/// Depth-first traversal on the calling thread.
#[derive(Debug, Clone)]
pub struct SequentialWalker {
    root: PathBuf,
}

impl SequentialWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Source for SequentialWalker {
    fn root(&self) -> Option<&Path> {
        Some(&self.root)
    }

    fn walk(&self, config: &WalkConfig, visit: &Visit<'_>) {
        let mut walker = WalkDir::new(&self.root).follow_links(false);
        if let Some(depth) = config.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut it = walker.into_iter();
        while let Some(res) = it.next() {
            let dent = match res {
                Ok(e) => e,
                Err(e) => {
                    // walkdir has already dropped the unreadable subtree.
                    visit(Err(map_walkdir_error(e)));
                    continue;
                }
            };

            let kind = EntryKind::from_file_type(dent.file_type());
            if dent.depth() == 0 && kind == EntryKind::Dir {
                continue;
            }

            let entry = Entry {
                path: dent.path().to_path_buf(),
                name: dent.file_name().to_string_lossy().into_owned(),
                kind,
                depth: dent.depth(),
            };

            if !visit_unit(visit, entry) && kind == EntryKind::Dir {
                it.skip_current_dir();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Unit boundary
// ---------------------------------------------------------------------------

/// Hand one entry to `visit`, containing any panic.
///
/// Returns `false` if the unit faulted. The fault is reported as
/// [`ScanError::Fault`] and the caller must not descend into the entry.
pub(crate) fn visit_unit(visit: &Visit<'_>, entry: Entry) -> bool {
    let path = entry.path.clone();
    match panic::catch_unwind(AssertUnwindSafe(|| visit(Ok(entry)))) {
        Ok(()) => true,
        Err(_) => {
            warn!(path = %path.display(), "traversal unit panicked; subtree dropped");
            visit(Err(ScanError::Fault(path)));
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error) -> ScanError {
    map_ignore_error_at(e, None)
}

fn map_ignore_error_at(e: ignore::Error, at: Option<PathBuf>) -> ScanError {
    match e {
        ignore::Error::WithPath { path, err } => map_ignore_error_at(*err, Some(path)),
        ignore::Error::WithDepth { err, .. } => map_ignore_error_at(*err, at),
        ignore::Error::Loop { child, .. } => ScanError::SymlinkLoop(child),
        ignore::Error::Io(io_err) => ScanError::from_io(at.unwrap_or_default(), io_err),
        other => ScanError::Source(other.to_string()),
    }
}

fn map_walkdir_error(e: walkdir::Error) -> ScanError {
    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
    if e.loop_ancestor().is_some() {
        return ScanError::SymlinkLoop(path);
    }
    let message = e.to_string();
    match e.into_io_error() {
        Some(io_err) => ScanError::from_io(path, io_err),
        None => ScanError::Source(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn ignore_errors_keep_the_innermost_path() {
        let err = ignore::Error::WithDepth {
            depth: 2,
            err: Box::new(ignore::Error::WithPath {
                path: PathBuf::from("tree/locked"),
                err: Box::new(ignore::Error::Io(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "denied",
                ))),
            }),
        };
        let mapped = map_ignore_error(err);
        assert!(matches!(mapped, ScanError::PermissionDenied(ref p) if p == Path::new("tree/locked")));
    }

    #[test]
    fn ignore_loop_maps_to_symlink_loop() {
        let err = ignore::Error::Loop {
            ancestor: PathBuf::from("a"),
            child: PathBuf::from("a/b/link"),
        };
        assert!(matches!(map_ignore_error(err), ScanError::SymlinkLoop(_)));
    }

    #[test]
    fn faulting_unit_reports_and_refuses_descent() {
        use std::sync::Mutex;

        let seen = Mutex::new(Vec::new());
        let visit = |res: Result<Entry, ScanError>| match res {
            Ok(entry) if entry.name == "boom" => panic!("matcher exploded"),
            Ok(entry) => seen.lock().unwrap().push(entry.name),
            Err(err) => seen.lock().unwrap().push(format!("err:{err}")),
        };

        let entry = |name: &str| Entry {
            path: PathBuf::from(name),
            name: name.to_string(),
            kind: EntryKind::Dir,
            depth: 1,
        };

        assert!(visit_unit(&visit, entry("fine")));
        assert!(!visit_unit(&visit, entry("boom")));
        let seen = seen.into_inner().unwrap();
        assert_eq!(seen[0], "fine");
        assert!(seen[1].starts_with("err:traversal fault"));
    }
}
