//! In-memory directory tree of an opened archive.
//!
//! Archive formats store a flat list of entry names; the tree restores the
//! hierarchy (including parent directories that have no entry of their own).

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFile {
    name: String,
    path: String,
    size: u64,
}

impl ArchiveFile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveDirectory {
    name: String,
    path: String,
    children: BTreeMap<String, ArchiveNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveNode {
    File(ArchiveFile),
    Directory(ArchiveDirectory),
}

impl ArchiveNode {
    pub fn name(&self) -> &str {
        match self {
            ArchiveNode::File(file) => file.name(),
            ArchiveNode::Directory(dir) => dir.name(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            ArchiveNode::File(file) => file.path(),
            ArchiveNode::Directory(dir) => dir.path(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, ArchiveNode::Directory(_))
    }

    pub fn as_directory(&self) -> Option<&ArchiveDirectory> {
        match self {
            ArchiveNode::Directory(dir) => Some(dir),
            ArchiveNode::File(_) => None,
        }
    }
}

impl ArchiveDirectory {
    /// Empty root directory (name and path are "").
    pub fn root() -> Self {
        Self::default()
    }

    fn with_path(name: &str, path: String) -> Self {
        Self {
            name: name.to_string(),
            path,
            children: BTreeMap::new(),
        }
    }

    /// Builds a tree from `(raw_path, is_dir, size)` triples as listed by an archive.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, bool, u64)>,
        S: AsRef<str>,
    {
        let mut root = Self::root();
        for (raw_path, is_dir, size) in entries {
            root.insert(raw_path.as_ref(), is_dir, size);
        }
        root
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ArchiveNode> {
        self.children.values()
    }

    pub fn child(&self, name: &str) -> Option<&ArchiveNode> {
        self.children.get(name)
    }

    /// Resolves a slash separated path relative to this directory.
    pub fn find(&self, path: &str) -> Option<&ArchiveNode> {
        let parts = split_entry_path(path)?;
        let (last, parents) = parts.split_last()?;
        let mut dir = self;
        for part in parents {
            dir = dir.child(part)?.as_directory()?;
        }
        dir.child(last)
    }

    /// Inserts one archive entry, creating missing parent directories.
    ///
    /// Returns false when the entry was skipped: unsafe path, empty path or a
    /// file/directory name clash with an earlier entry.
    pub fn insert(&mut self, raw_path: &str, is_dir: bool, size: u64) -> bool {
        let Some(parts) = split_entry_path(raw_path) else {
            return false;
        };
        let Some((last, parents)) = parts.split_last() else {
            return false;
        };

        let mut dir = self;
        for part in parents {
            let path = join_path(&dir.path, part);
            let node = dir
                .children
                .entry(part.clone())
                .or_insert_with(|| ArchiveNode::Directory(Self::with_path(part, path)));
            dir = match node {
                ArchiveNode::Directory(next) => next,
                ArchiveNode::File(_) => return false,
            };
        }

        let path = join_path(&dir.path, last);
        match dir.children.get(last) {
            Some(ArchiveNode::Directory(_)) => is_dir,
            Some(ArchiveNode::File(_)) if is_dir => false,
            _ => {
                let node = if is_dir {
                    ArchiveNode::Directory(Self::with_path(last, path))
                } else {
                    ArchiveNode::File(ArchiveFile {
                        name: last.clone(),
                        path,
                        size,
                    })
                };
                dir.children.insert(last.clone(), node);
                true
            }
        }
    }

    /// Number of files and directories below this directory.
    pub fn total_entries(&self) -> usize {
        self.children
            .values()
            .map(|node| match node {
                ArchiveNode::File(_) => 1,
                ArchiveNode::Directory(dir) => 1 + dir.total_entries(),
            })
            .sum()
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Splits an archive entry name into its components.
///
/// Backslashes count as separators, empty and `.` components are dropped.
/// Absolute names and names containing `..` yield `None`.
pub fn split_entry_path(raw: &str) -> Option<Vec<String>> {
    let normalized = raw.replace('\\', "/");
    if normalized.starts_with('/') {
        return None;
    }
    let mut parts = Vec::new();
    for part in normalized.split('/') {
        match part {
            "" | "." => {}
            ".." => return None,
            other => parts.push(other.to_string()),
        }
    }
    Some(parts)
}

/// Canonical form of an entry name: separators normalized, no leading or trailing `/`.
pub fn normalize_entry_name(raw: &str) -> Option<String> {
    split_entry_path(raw).map(|parts| parts.join("/"))
}
