use super::*;
use crate::system::archive::{open_archive, open_writer, OpenArchive};
use crate::system::detect::{
    classify_mime, detect_archive_kind, writer_kind_for_suffix, ArchiveKind,
};
use crate::system::workspace::{clean_directory, resolve_in};
use crate::utils::error::ArchiveNavError;
use std::fs::{self, File};
use std::io;
use tracing::warn;

impl ArchiveManager {
    // === 아카이브 열기 ===

    /// 아카이브를 열고 디렉토리 목록 전체를 다시 만든다
    ///
    /// 실패하면 에러만 기록하고 이전 목록과 경로는 그대로 둔다.
    pub fn open_archive(&mut self, path: &Path) -> Result<()> {
        self.set_error(ErrorKind::NoError);
        self.state = ModelState::Loading;

        let archive = match self.open_reader(path) {
            Ok(archive) => archive,
            Err(e) => {
                warn!("cannot open {}: {}", path.display(), e);
                let kind = e.kind();
                self.state = ModelState::Failed(kind);
                self.set_error(kind);
                return Err(e);
            }
        };

        let listing = DirectoryListing::from_tree(archive.root());
        drop(archive);
        debug!(
            "loaded {} ({} directories)",
            path.display(),
            listing.len()
        );

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.archive_path = Some(path.to_path_buf());
        self.set_name(name);
        self.listing = listing;
        self.state = ModelState::Loaded;
        self.emit(ModelEvent::ListingChanged);
        self.set_current_dir("");
        Ok(())
    }

    /// 미디어 타입으로 형식을 판별하고 아카이브 트리를 읽는다
    fn open_reader(&self, path: &Path) -> Result<OpenArchive> {
        let readable = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
            && File::open(path).is_ok();
        if !readable {
            return Err(ArchiveNavError::UnreadablePath {
                path: path.to_path_buf(),
            });
        }

        let mime = self.detector.detect(path).unwrap_or_default();
        let kind = classify_mime(&mime).ok_or_else(|| ArchiveNavError::UnsupportedFormat {
            path: path.to_path_buf(),
            mime: mime.clone(),
        })?;
        open_archive(path, kind)
    }

    fn loaded_reader(&self) -> Result<OpenArchive> {
        let path = self.archive_path.as_deref().ok_or(ArchiveNavError::NoArchive)?;
        self.open_reader(path)
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            warn!("{}", e);
            self.set_error(e.kind());
        }
        result
    }

    /// 내용 기준으로 지원하는 아카이브인지 확인
    pub fn is_archive_file(&self, path: &Path) -> bool {
        detect_archive_kind(self.detector.as_ref(), path).is_some()
    }

    // === 압축 해제 ===

    /// 선택한 항목들을 temp 디렉토리로 복사
    ///
    /// 아카이브에 없는 경로는 조용히 건너뛴다. 실제로 만들어진 경로만 반환.
    pub fn extract_entries<S: AsRef<str>>(&mut self, paths: &[S]) -> Vec<PathBuf> {
        let temp_dir = self.config.temp_dir.clone();
        let result = self
            .loaded_reader()
            .and_then(|archive| archive.copy_entries_to(paths, &temp_dir));
        match self.record(result) {
            Ok(produced) => {
                for path in &produced {
                    debug!("extracted to {}", path.display());
                }
                produced
            }
            Err(_) => Vec::new(),
        }
    }

    /// 아카이브 전체를 대상 디렉토리에 풀기 (기존 파일 덮어씀)
    pub fn extract_all(&mut self, destination_dir: &Path) -> Result<()> {
        let result = self
            .loaded_reader()
            .and_then(|archive| archive.copy_all_to(destination_dir));
        let count = self.record(result)?;
        debug!("extracted {} entries to {}", count, destination_dir.display());

        self.emit(ModelEvent::ListingChanged);
        self.set_current_dir("");
        Ok(())
    }

    /// 편집용으로 staging 디렉토리에 풀기
    pub fn extract_to_staging(&mut self) -> Result<()> {
        let staging = self.config.staging_dir.clone();
        self.extract_all(&staging)
    }

    // === 새 아카이브 ===

    /// staging 디렉토리 내용으로 `<temp>/<name>.<suffix>` 아카이브 생성
    pub fn save_as(&mut self, name: &str, suffix: &str) -> Result<PathBuf> {
        let Some(kind) = writer_kind_for_suffix(suffix) else {
            return self.record(Err(ArchiveNavError::UnsupportedSuffix {
                suffix: suffix.to_string(),
            }));
        };

        let file_name = format!("{}.{}", name, suffix);
        let result = resolve_in(&self.config.temp_dir, "", &file_name)
            .and_then(|output| self.write_staging(&output, kind))
            .map_err(|e| match e {
                ArchiveNavError::ArchiveWriteFailed { .. } => e,
                other => ArchiveNavError::ArchiveWriteFailed {
                    path: self.config.temp_dir.join(&file_name),
                    reason: other.to_string(),
                },
            });
        let output = self.record(result)?;
        debug!("archive written to {}", output.display());
        Ok(output)
    }

    fn write_staging(&self, output: &Path, kind: ArchiveKind) -> Result<PathBuf> {
        let mut writer = open_writer(output, kind)?;

        let mut children = fs::read_dir(&self.config.staging_dir)?
            .collect::<io::Result<Vec<_>>>()?;
        children.sort_by_key(|entry| entry.file_name());
        for child in children {
            let child_path = child.path();
            let child_name = child.file_name().to_string_lossy().into_owned();
            debug!("add: {} as {}", child_path.display(), child_name);
            if child_path.is_dir() {
                writer.add_directory(&child_path, &child_name)?;
            } else {
                writer.add_file(&child_path, &child_name)?;
            }
        }

        writer.finish()
    }

    // === 초기화 ===

    /// 모델 초기화 및 temp/staging 디렉토리 비우기
    ///
    /// 두 디렉토리는 비운 뒤에도 남는다 (한쪽이 다른 쪽 안에 있으면 다시 만든다).
    pub fn clear(&mut self) -> Result<()> {
        self.archive_path = None;
        self.set_name(String::new());
        self.set_error(ErrorKind::NoError);
        self.state = ModelState::Empty;

        self.listing.clear();
        self.current_rows.clear();
        self.current_dir.clear();
        self.emit(ModelEvent::CurrentDirChanged(String::new()));
        self.emit(ModelEvent::Reset);

        let temp_dir = self.config.temp_dir.clone();
        let staging_dir = self.config.staging_dir.clone();
        let cleaned = clean_directory(&temp_dir)
            .and_then(|_| clean_directory(&staging_dir))
            .and_then(|_| ensure_dir(&temp_dir))
            .and_then(|_| ensure_dir(&staging_dir));

        self.emit(ModelEvent::RowsChanged { row_count: 0 });
        self.refresh_has_files();
        cleaned
    }

    // === staging 편집 ===

    /// staging 디렉토리 안에 폴더 생성 (`parent`는 staging 기준 상대 경로)
    pub fn append_folder(&self, name: &str, parent: &str) -> Result<PathBuf> {
        let path = resolve_in(&self.config.staging_dir, parent, name)?;
        debug!("new folder: {}", path.display());
        fs::create_dir(&path)?;
        Ok(path)
    }

    pub fn remove_file(&self, name: &str, parent: &str) -> Result<()> {
        let path = resolve_in(&self.config.staging_dir, parent, name)?;
        fs::remove_file(path)?;
        Ok(())
    }

    pub fn remove_folder(&self, name: &str, parent: &str) -> Result<()> {
        let path = resolve_in(&self.config.staging_dir, parent, name)?;
        fs::remove_dir_all(path)?;
        Ok(())
    }

    /// 파일/폴더를 대상 디렉토리 안으로 이동 (이름 유지)
    pub fn move_into(&self, source: &Path, destination_dir: &Path) -> Result<PathBuf> {
        let file_name = source
            .file_name()
            .ok_or_else(|| ArchiveNavError::InvalidName {
                name: source.display().to_string(),
            })?;
        let target = destination_dir.join(file_name);
        debug!("rename {} to {}", source.display(), target.display());
        fs::rename(source, &target)?;
        Ok(target)
    }
}
