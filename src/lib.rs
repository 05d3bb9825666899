//! # fsift
//!
//! Fast best-effort filename discovery: walk a directory tree, test every
//! file's base name against glob patterns and an optional regex, and return
//! the matches in a deterministic order.
//!
//! fsift owns the walk engine, the match policy ([`PatternSet`]), the final
//! ordering ([`order`](mod@order)), the contracts ([`Source`], [`Matcher`]), the
//! error type, and the builder API. Output formatting belongs to the caller.
//!
//! Unreadable subtrees are skipped without aborting the scan. The only
//! failure that stops a scan is a configuration error such as an invalid
//! regex, and it is reported before the filesystem is touched.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! let results = fsift::scan()
//!     .root(".")
//!     .run()
//!     .unwrap();
//!
//! // Default patterns: *.kdbx and *.conf files come last.
//! for path in &results.paths {
//!     println!("{}", path.display());
//! }
//! ```
//!
//! # Custom Sources
//!
//! Implement [`Source`] to scan something other than the local filesystem:
//!
//! ```rust
//! use fsift::{Entry, EntryKind, Source, Visit, WalkConfig};
//!
//! struct NameSource(Vec<&'static str>);
//!
//! impl Source for NameSource {
//!     fn walk(&self, _config: &WalkConfig, visit: &Visit<'_>) {
//!         for name in &self.0 {
//!             visit(Ok(Entry {
//!                 path:  name.into(),
//!                 name:  name.to_string(),
//!                 kind:  EntryKind::File,
//!                 depth: 1,
//!             }));
//!         }
//!     }
//! }
//!
//! let results = fsift::scan()
//!     .source(NameSource(vec!["vault.kdbx", "notes.txt", "photo.jpg"]))
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(results.matches, 2);
//! assert_eq!(results.paths[0].to_str(), Some("notes.txt"));
//! ```

#![forbid(unsafe_code)]

pub mod engine;
pub mod order;
pub mod pattern;

mod builder;
mod entry;
mod error;
mod results;
mod traits;
mod walker;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::ScanBuilder;
pub use engine::WalkConfig;
pub use entry::{Entry, EntryKind};
pub use error::ScanError;
pub use order::OrderingPolicy;
pub use pattern::{PatternSet, DEFAULT_PATTERNS};
pub use results::{Results, ScanStats};
pub use traits::{Matcher, Source, Visit};
pub use walker::{ParallelWalker, SequentialWalker};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`ScanBuilder`] to configure and run a scan.
///
/// # Example
///
/// ```rust,no_run
/// let results = fsift::scan()
///     .root("/home")
///     .patterns(["*.kdbx"])
///     .run()
///     .unwrap();
///
/// println!("Found {} matches in {:.3}s",
///     results.matches,
///     results.stats.duration.as_secs_f64()
/// );
/// ```
pub fn scan() -> ScanBuilder {
    ScanBuilder::default()
}
