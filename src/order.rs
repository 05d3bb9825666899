//! Final ordering of matched paths.
//!
//! Arrival order from the walker is not deterministic under parallel
//! traversal, so every scan ends with one of these sorts. Both are stable.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::pattern::is_default_list;

/// Suffixes (compared case-insensitively) that sort after everything else
/// under [`OrderingPolicy::PriorityDemote`].
pub const LOW_PRIORITY_SUFFIXES: &[&str] = &[".kdbx", ".conf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingPolicy {
    /// Byte order of the full path string.
    #[default]
    Lexicographic,

    /// Low-priority paths last, byte order within each band.
    PriorityDemote,
}

impl OrderingPolicy {
    /// `PriorityDemote` iff `patterns` is exactly the built-in default list.
    /// A regex filter does not change the answer.
    pub fn for_patterns(patterns: &[String]) -> Self {
        if is_default_list(patterns) {
            Self::PriorityDemote
        } else {
            Self::Lexicographic
        }
    }
}

/// Whether `path` ends, case-insensitively, in one of [`LOW_PRIORITY_SUFFIXES`].
pub fn is_low_priority(path: &Path) -> bool {
    let lower = path.to_string_lossy().to_lowercase();
    LOW_PRIORITY_SUFFIXES.iter().any(|s| lower.ends_with(*s))
}

/// Sort `paths` under `policy`.
pub fn order(paths: Vec<PathBuf>, policy: OrderingPolicy) -> Vec<PathBuf> {
    order_by(paths, policy, |p| p.as_path())
}

/// Sort any records carrying a path under `policy`.
///
/// Records whose paths compare equal keep their input order.
pub fn order_by<T, F>(mut items: Vec<T>, policy: OrderingPolicy, path_of: F) -> Vec<T>
where
    F: Fn(&T) -> &Path,
{
    match policy {
        OrderingPolicy::Lexicographic => {
            items.sort_by(|a, b| by_path(path_of(a), path_of(b)));
        }
        OrderingPolicy::PriorityDemote => {
            let mut keyed: Vec<(bool, T)> = items
                .into_iter()
                .map(|item| (is_low_priority(path_of(&item)), item))
                .collect();
            keyed.sort_by(|(low_a, a), (low_b, b)| {
                low_a.cmp(low_b).then_with(|| by_path(path_of(a), path_of(b)))
            });
            items = keyed.into_iter().map(|(_, item)| item).collect();
        }
    }
    items
}

// Whole-string comparison. `Path::cmp` compares by component, which puts
// "a/b" before "a.b"; the output contract is plain string order.
fn by_path(a: &Path, b: &Path) -> Ordering {
    a.as_os_str().cmp(b.as_os_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn demotes_kdbx_and_conf() {
        let input = paths(&["c.conf", "b.kdbx", "d.ini", "a.txt"]);
        let out = order(input, OrderingPolicy::PriorityDemote);
        assert_eq!(out, paths(&["a.txt", "d.ini", "b.kdbx", "c.conf"]));
    }

    #[test]
    fn demotion_ignores_case() {
        let input = paths(&["Vault.KDBX", "z.txt", "App.Conf"]);
        let out = order(input, OrderingPolicy::PriorityDemote);
        assert_eq!(out, paths(&["z.txt", "App.Conf", "Vault.KDBX"]));
    }

    #[test]
    fn config_suffix_is_not_demoted() {
        let input = paths(&["z.config", "a.conf"]);
        let out = order(input, OrderingPolicy::PriorityDemote);
        assert_eq!(out, paths(&["z.config", "a.conf"]));
    }

    #[test]
    fn lexicographic_is_plain_string_order() {
        let input = paths(&["b.kdbx", "a/b.txt", "a.b.txt", "B.txt"]);
        let out = order(input, OrderingPolicy::Lexicographic);
        assert_eq!(out, paths(&["B.txt", "a.b.txt", "a/b.txt", "b.kdbx"]));
    }

    #[test]
    fn sorting_sorted_input_is_identity() {
        let once = order(paths(&["x", "c.conf", "a", "m.kdbx"]), OrderingPolicy::PriorityDemote);
        let twice = order(once.clone(), OrderingPolicy::PriorityDemote);
        assert_eq!(once, twice);

        let once = order(paths(&["q", "b", "a"]), OrderingPolicy::Lexicographic);
        assert_eq!(order(once.clone(), OrderingPolicy::Lexicographic), once);
    }

    #[test]
    fn policy_follows_default_list() {
        let defaults: Vec<String> =
            crate::pattern::DEFAULT_PATTERNS.iter().map(|s| s.to_string()).collect();
        assert_eq!(OrderingPolicy::for_patterns(&defaults), OrderingPolicy::PriorityDemote);
        assert_eq!(
            OrderingPolicy::for_patterns(&["*.kdbx".to_string()]),
            OrderingPolicy::Lexicographic
        );
        assert_eq!(OrderingPolicy::for_patterns(&[]), OrderingPolicy::Lexicographic);
    }

    #[test]
    fn equal_paths_keep_input_order() {
        let input = vec![
            (PathBuf::from("b.kdbx"), 1),
            (PathBuf::from("dup.txt"), 2),
            (PathBuf::from("a.txt"), 3),
            (PathBuf::from("b.kdbx"), 4),
            (PathBuf::from("dup.txt"), 5),
            (PathBuf::from("dup.txt"), 6),
        ];

        let demoted = order_by(input.clone(), OrderingPolicy::PriorityDemote, |(p, _)| p.as_path());
        let tags: Vec<u32> = demoted.iter().map(|(_, tag)| *tag).collect();
        assert_eq!(tags, vec![3, 2, 5, 6, 1, 4]);

        let plain = order_by(input, OrderingPolicy::Lexicographic, |(p, _)| p.as_path());
        let tags: Vec<u32> = plain.iter().map(|(_, tag)| *tag).collect();
        assert_eq!(tags, vec![3, 1, 4, 2, 5, 6]);
    }

    #[test]
    fn duplicate_paths_are_kept() {
        let out = order(paths(&["x.conf", "a", "x.conf", "a"]), OrderingPolicy::PriorityDemote);
        assert_eq!(out, paths(&["a", "a", "x.conf", "x.conf"]));
    }

    #[test]
    fn empty_input() {
        assert!(order(Vec::new(), OrderingPolicy::PriorityDemote).is_empty());
    }
}
