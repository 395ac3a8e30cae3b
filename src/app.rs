use crate::config::ModelConfig;
use crate::models::{DirectoryListing, Entry, ErrorKind, ModelEvent, ModelObserver, ModelState};
use crate::system::detect::{ContentDetector, MediaTypeDetector};
use crate::system::workspace::ensure_dir;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

mod navigation;
mod operations;

/// 아카이브 탐색 모델
///
/// 아카이브 하나의 디렉토리 목록과 현재 디렉토리, 마지막 에러를 관리한다.
/// 모든 작업은 호출 스레드에서 동기적으로 끝난다.
pub struct ArchiveManager {
    config: ModelConfig,
    detector: Box<dyn MediaTypeDetector>,
    observers: Vec<Box<dyn ModelObserver>>,
    /// 현재 열린 아카이브 경로
    archive_path: Option<PathBuf>,
    /// 아카이브 파일 이름
    name: String,
    /// 현재 디렉토리 ("" = 루트)
    current_dir: String,
    state: ModelState,
    error: ErrorKind,
    listing: DirectoryListing,
    /// 현재 디렉토리의 보이는 행
    current_rows: Vec<Entry>,
    has_files: bool,
}

impl ArchiveManager {
    /// 새 모델 생성, staging/temp 디렉토리를 만든다
    pub fn new(config: ModelConfig) -> Result<Self> {
        Self::with_detector(config, Box::new(ContentDetector))
    }

    pub fn with_detector(config: ModelConfig, detector: Box<dyn MediaTypeDetector>) -> Result<Self> {
        ensure_dir(&config.staging_dir)?;
        ensure_dir(&config.temp_dir)?;
        debug!(
            "staging dir: {}, temp dir: {}",
            config.staging_dir.display(),
            config.temp_dir.display()
        );

        Ok(Self {
            config,
            detector,
            observers: Vec::new(),
            archive_path: None,
            name: String::new(),
            current_dir: String::new(),
            state: ModelState::Empty,
            error: ErrorKind::NoError,
            listing: DirectoryListing::new(),
            current_rows: Vec::new(),
            has_files: false,
        })
    }

    /// 변경 알림 수신자 등록
    pub fn subscribe(&mut self, observer: Box<dyn ModelObserver>) {
        self.observers.push(observer);
    }

    fn emit(&self, event: ModelEvent) {
        for observer in &self.observers {
            observer.notify(&event);
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn staging_dir(&self) -> &Path {
        &self.config.staging_dir
    }

    pub fn temp_dir(&self) -> &Path {
        &self.config.temp_dir
    }

    pub fn archive_path(&self) -> Option<&Path> {
        self.archive_path.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ModelState {
        self.state
    }

    /// 마지막 에러
    pub fn error(&self) -> ErrorKind {
        self.error
    }

    pub fn listing(&self) -> &DirectoryListing {
        &self.listing
    }

    /// 목록 데이터 존재 여부
    pub fn has_data(&self) -> bool {
        !self.listing.is_empty()
    }

    fn set_error(&mut self, error: ErrorKind) {
        self.error = error;
        self.emit(ModelEvent::ErrorChanged(error));
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
        self.emit(ModelEvent::NameChanged(self.name.clone()));
    }
}
