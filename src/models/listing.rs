use crate::models::entry::{compare_entries, Entry};
use crate::system::tree::{ArchiveDirectory, ArchiveNode};
use std::collections::HashMap;

/// 디렉토리 경로별 항목 목록
///
/// 키는 아카이브 루트 기준 경로("" = 루트). 아카이브 트리의 모든 디렉토리가
/// 빈 디렉토리까지 정확히 하나의 키를 가진다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    directories: HashMap<String, Vec<Entry>>,
}

impl DirectoryListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// 트리 전체를 한 번에 평탄화
    pub fn from_tree(root: &ArchiveDirectory) -> Self {
        let mut listing = Self::new();
        listing.flatten_directory(root, "");
        listing
    }

    /// 전위 순회: 자식 항목을 모으고 하위 디렉토리는 `prefix/name/`으로 재귀
    fn flatten_directory(&mut self, dir: &ArchiveDirectory, prefix: &str) {
        let mut entries = Vec::new();
        for node in dir.entries() {
            let full_path = format!("{}{}", prefix, node.name());
            entries.push(Entry::new(node.name(), node.is_dir(), full_path.as_str()));

            if let ArchiveNode::Directory(child) = node {
                self.flatten_directory(child, &format!("{}/", full_path));
            }
        }

        entries.sort_by(compare_entries);
        let key = prefix.strip_suffix('/').unwrap_or(prefix);
        self.directories.insert(key.to_string(), entries);
    }

    /// 디렉토리 항목 조회
    pub fn get(&self, dir: &str) -> Option<&[Entry]> {
        self.directories.get(dir).map(Vec::as_slice)
    }

    pub fn contains(&self, dir: &str) -> bool {
        self.directories.contains_key(dir)
    }

    /// 디렉토리 개수
    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    pub fn clear(&mut self) {
        self.directories.clear();
    }

    /// 정렬된 디렉토리 경로 목록
    pub fn directories(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.directories.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// 모든 항목 (경로 순)
    pub fn all_entries(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.directories.values().flatten().collect();
        entries.sort_by(|a, b| a.full_path.cmp(&b.full_path));
        entries
    }
}

/// 상위 디렉토리 경로 ("" 의 상위는 None)
pub fn parent_dir(dir: &str) -> Option<&str> {
    if dir.is_empty() {
        return None;
    }
    Some(dir.rsplit_once('/').map_or("", |(parent, _)| parent))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> ArchiveDirectory {
        ArchiveDirectory::from_entries(vec![
            ("zeta.txt", false, 1),
            ("Alpha.txt", false, 1),
            ("beta/", true, 0),
            ("beta/inner.txt", false, 1),
            ("beta/sub/deep.bin", false, 1),
            ("Gamma/", true, 0),
            ("empty/", true, 0),
        ])
    }

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_every_directory_has_one_key() {
        let listing = DirectoryListing::from_tree(&sample_tree());
        assert_eq!(
            listing.directories(),
            vec!["", "Gamma", "beta", "beta/sub", "empty"]
        );
        assert_eq!(listing.get("empty"), Some(&[][..]));
        assert_eq!(listing.get("Gamma"), Some(&[][..]));
    }

    #[test]
    fn test_root_sorted_directories_first_case_insensitive() {
        let listing = DirectoryListing::from_tree(&sample_tree());
        let root = listing.get("").expect("root listing");
        assert_eq!(
            names(root),
            vec!["beta", "empty", "Gamma", "Alpha.txt", "zeta.txt"]
        );
    }

    #[test]
    fn test_full_paths_match_tree_children() {
        let tree = sample_tree();
        let listing = DirectoryListing::from_tree(&tree);

        for dir in listing.directories() {
            let node_dir = if dir.is_empty() {
                &tree
            } else {
                tree.find(dir)
                    .and_then(ArchiveNode::as_directory)
                    .expect("directory in tree")
            };
            let mut expected: Vec<String> =
                node_dir.entries().map(|n| n.path().to_string()).collect();
            let mut actual: Vec<String> = listing
                .get(dir)
                .expect("listing")
                .iter()
                .map(|e| e.full_path.clone())
                .collect();
            expected.sort();
            actual.sort();
            assert_eq!(actual, expected, "children of {:?}", dir);
        }
    }

    #[test]
    fn test_nested_entries() {
        let listing = DirectoryListing::from_tree(&sample_tree());
        let beta = listing.get("beta").expect("beta listing");
        assert_eq!(names(beta), vec!["sub", "inner.txt"]);
        assert_eq!(beta[0].full_path, "beta/sub");
        assert!(beta[0].is_dir);

        let sub = listing.get("beta/sub").expect("sub listing");
        assert_eq!(sub, &[Entry::new("deep.bin", false, "beta/sub/deep.bin")][..]);
        assert!(listing.get("beta/").is_none());
    }

    #[test]
    fn test_empty_tree_has_root_only() {
        let listing = DirectoryListing::from_tree(&ArchiveDirectory::root());
        assert_eq!(listing.len(), 1);
        assert_eq!(listing.get(""), Some(&[][..]));
    }

    #[test]
    fn test_clear_and_all_entries() {
        let mut listing = DirectoryListing::from_tree(&sample_tree());
        assert_eq!(listing.all_entries().len(), 8);
        listing.clear();
        assert!(listing.is_empty());
        assert!(!listing.contains(""));
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(""), None);
        assert_eq!(parent_dir("beta"), Some(""));
        assert_eq!(parent_dir("beta/sub"), Some("beta"));
    }
}
