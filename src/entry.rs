use std::path::PathBuf;

/// A single item produced by a [`Source`](crate::traits::Source) during traversal.
///
/// Only the name is ever inspected by matching. `path` keeps the form of the
/// scan root: a relative root yields relative paths, an absolute root yields
/// absolute ones.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Full path to the entry.
    pub path: PathBuf,

    /// The entry's base name. Never contains a path separator.
    pub name: String,

    /// What kind of entry this is.
    pub kind: EntryKind,

    /// How deep in the traversal this entry was found. Root = 0.
    pub depth: usize,
}

/// The kind of a traversed entry.
///
/// Filesystem sources map `DirEntry` file types to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link. Never followed; tested by name like a file.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

impl EntryKind {
    pub(crate) fn from_file_type(ft: std::fs::FileType) -> Self {
        if ft.is_dir() {
            Self::Dir
        } else if ft.is_file() {
            Self::File
        } else if ft.is_symlink() {
            Self::Symlink
        } else {
            Self::Other
        }
    }
}
