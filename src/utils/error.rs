use crate::models::state::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveNavError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot read {path}")]
    UnreadablePath { path: PathBuf },

    #[error("Unsupported archive format: {path} ({mime})")]
    UnsupportedFormat { path: PathBuf, mime: String },

    #[error("Unsupported archive suffix: {suffix}")]
    UnsupportedSuffix { suffix: String },

    #[error("Failed to list archive {path}: {reason}")]
    ArchiveListFailed { path: PathBuf, reason: String },

    #[error("Failed to extract archive {path}: {reason}")]
    ArchiveExtractFailed { path: PathBuf, reason: String },

    #[error("Failed to write archive {path}: {reason}")]
    ArchiveWriteFailed { path: PathBuf, reason: String },

    #[error("Invalid name: {name}")]
    InvalidName { name: String },

    #[error("No archive is loaded")]
    NoArchive,
}

impl ArchiveNavError {
    /// 모델에 기록되는 에러 종류로 변환
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArchiveNavError::UnsupportedFormat { .. } | ArchiveNavError::UnsupportedSuffix { .. } => {
                ErrorKind::UnsupportedFormat
            }
            ArchiveNavError::ArchiveWriteFailed { .. } => ErrorKind::WriteError,
            ArchiveNavError::Io(_)
            | ArchiveNavError::Config(_)
            | ArchiveNavError::UnreadablePath { .. }
            | ArchiveNavError::ArchiveListFailed { .. }
            | ArchiveNavError::ArchiveExtractFailed { .. }
            | ArchiveNavError::InvalidName { .. }
            | ArchiveNavError::NoArchive => ErrorKind::UnreadablePath,
        }
    }
}

pub type Result<T> = std::result::Result<T, ArchiveNavError>;
