use crate::utils::error::{ArchiveNavError, Result};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// 작업 디렉토리 생성 (이미 있으면 그대로 사용)
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// 디렉토리 내용 비우기
///
/// 파일과 하위 디렉토리를 모두 지우고 디렉토리 자체는 남긴다.
/// 디렉토리가 없으면 아무것도 하지 않는다.
pub fn clean_directory(path: &Path) -> Result<usize> {
    let read_dir = match fs::read_dir(path) {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(ArchiveNavError::Io(e)),
    };

    let mut removed = 0usize;
    for entry in read_dir {
        let entry = entry?;
        let entry_path = entry.path();
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&entry_path)?;
        } else {
            fs::remove_file(&entry_path)?;
        }
        removed += 1;
    }
    debug!("cleaned {} ({} entries)", path.display(), removed);
    Ok(removed)
}

/// 작업 디렉토리 기준 상대 경로를 안전하게 결합
///
/// `parent`는 비어 있을 수 있다. `..`, 절대 경로, 빈 이름은 거부한다.
pub fn resolve_in(base: &Path, parent: &str, name: &str) -> Result<PathBuf> {
    let invalid = || ArchiveNavError::InvalidName {
        name: if parent.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", parent, name)
        },
    };

    if name.trim().is_empty() {
        return Err(invalid());
    }

    let mut resolved = base.to_path_buf();
    for raw in [parent, name] {
        for comp in Path::new(raw).components() {
            match comp {
                Component::Normal(v) => resolved.push(v),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid())
                }
            }
        }
    }

    if resolved == base {
        return Err(invalid());
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_clean_directory_removes_files_and_dirs() {
        let temp = tempdir().expect("create tempdir");
        let root = temp.path().join("work");
        fs::create_dir_all(root.join("a").join("b")).expect("create nested");
        fs::write(root.join("file.txt"), b"x").expect("write file");
        fs::write(root.join("a").join("b").join("deep.txt"), b"y").expect("write deep");

        let removed = clean_directory(&root).expect("clean");
        assert_eq!(removed, 2);
        assert!(root.is_dir());
        assert_eq!(fs::read_dir(&root).expect("read dir").count(), 0);

        // 두 번째 호출도 성공하고 비어 있는 상태 유지
        assert_eq!(clean_directory(&root).expect("clean again"), 0);
    }

    #[test]
    fn test_clean_missing_directory_is_noop() {
        let temp = tempdir().expect("create tempdir");
        let missing = temp.path().join("missing");
        assert_eq!(clean_directory(&missing).expect("clean missing"), 0);
        assert!(!missing.exists());
    }

    #[test]
    fn test_resolve_in_blocks_unsafe_names() {
        let base = PathBuf::from("/tmp/staging");
        assert_eq!(
            resolve_in(&base, "", "docs").expect("plain name"),
            base.join("docs")
        );
        assert_eq!(
            resolve_in(&base, "docs/api", "new").expect("nested name"),
            base.join("docs").join("api").join("new")
        );
        assert!(resolve_in(&base, "", "../evil").is_err());
        assert!(resolve_in(&base, "/etc", "passwd").is_err());
        assert!(resolve_in(&base, "", "  ").is_err());
        assert!(resolve_in(&base, "", ".").is_err());
    }
}
