//! Filename match policy: glob patterns OR an optional regex, tested on the
//! base name only.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use regex::Regex;
use tracing::{debug, warn};

use crate::entry::Entry;
use crate::error::ScanError;
use crate::traits::Matcher;

/// The built-in pattern set used when the caller configures nothing.
pub const DEFAULT_PATTERNS: &[&str] = &[
    "*.txt", "*.csv", "*.kdbx", "*.config", "*.conf", "*.key", "*.rsa", "*.ini",
];

/// Split a comma-separated pattern list, trimming each item.
///
/// An empty input yields an empty list rather than one empty pattern.
pub fn split_patterns(list: &str) -> Vec<String> {
    if list.is_empty() {
        return Vec::new();
    }
    list.split(',').map(|p| p.trim().to_string()).collect()
}

/// Glob patterns and an optional regex, combined with logical OR.
///
/// With no usable globs and no regex, nothing matches.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<String>,
    globs: GlobSet,
    regex: Option<Regex>,
    rejected: Vec<(String, globset::Error)>,
}

impl PatternSet {
    /// Compile a pattern set.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidRegex`] if `regex` does not compile. A
    /// malformed glob is never an error: it is dropped, logged, and listed by
    /// [`rejected`](Self::rejected).
    pub fn new<I, S>(patterns: I, regex: Option<&str>) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let regex = match regex.filter(|r| !r.is_empty()) {
            Some(src) => Some(Regex::new(src).map_err(|source| ScanError::InvalidRegex {
                pattern: src.to_string(),
                source,
            })?),
            None => None,
        };

        Ok(Self::compile(patterns.into_iter().map(Into::into).collect(), regex))
    }

    /// The built-in default set, no regex.
    pub fn default_set() -> Self {
        Self::compile(DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(), None)
    }

    fn compile(patterns: Vec<String>, regex: Option<Regex>) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut rejected = Vec::new();

        for pattern in &patterns {
            match compile_glob(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(err) => {
                    warn!(pattern = %pattern, error = %err, "ignoring malformed glob");
                    rejected.push((pattern.clone(), err));
                }
            }
        }

        // Every glob in the builder already compiled on its own.
        let globs = builder.build().unwrap_or_else(|err| {
            debug!(error = %err, "glob set failed to build; globs disabled");
            GlobSet::empty()
        });

        Self {
            patterns,
            globs,
            regex,
            rejected,
        }
    }

    /// Does this base name match?
    pub fn matches(&self, name: &str) -> bool {
        self.globs.is_match(name) || self.regex.as_ref().is_some_and(|re| re.is_match(name))
    }

    /// The glob patterns as configured, malformed ones included, in order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Globs that failed to compile and therefore never match.
    pub fn rejected(&self) -> impl Iterator<Item = &str> {
        self.rejected.iter().map(|(pattern, _)| pattern.as_str())
    }

    pub(crate) fn rejected_errors(&self) -> impl Iterator<Item = ScanError> + '_ {
        self.rejected.iter().map(|(pattern, err)| ScanError::InvalidGlob {
            pattern: pattern.clone(),
            source: err.clone(),
        })
    }

    pub fn regex(&self) -> Option<&Regex> {
        self.regex.as_ref()
    }

    /// Whether the configured glob list is exactly [`DEFAULT_PATTERNS`].
    pub fn is_default(&self) -> bool {
        is_default_list(&self.patterns)
    }

    /// True when nothing can ever match.
    pub fn is_empty(&self) -> bool {
        self.globs.is_empty() && self.regex.is_none()
    }
}

impl Matcher for PatternSet {
    fn is_match(&self, entry: &Entry) -> bool {
        self.matches(&entry.name)
    }
}

/// Element-for-element comparison against [`DEFAULT_PATTERNS`].
pub(crate) fn is_default_list(patterns: &[String]) -> bool {
    patterns.len() == DEFAULT_PATTERNS.len()
        && patterns.iter().zip(DEFAULT_PATTERNS).all(|(a, b)| a == b)
}

/// Shell-style glob on a single name: `*`, `?` and `[...]` only,
/// case-sensitive, `\` escapes, no separator semantics.
fn compile_glob(pattern: &str) -> Result<globset::Glob, globset::Error> {
    GlobBuilder::new(&literal_braces(pattern))
        .literal_separator(true)
        .backslash_escape(true)
        .build()
}

/// Escape `{` and `}` outside character classes so `globset` does not read
/// them as alternation.
fn literal_braces(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push(c);
                // A leading negation and a leading `]` belong to the class.
                if let Some(&neg @ ('!' | '^')) = chars.peek() {
                    out.push(neg);
                    chars.next();
                }
                if let Some(&']') = chars.peek() {
                    out.push(']');
                    chars.next();
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            '{' | '}' if !in_class => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
