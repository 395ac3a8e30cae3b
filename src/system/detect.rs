//! Archive classification by content.
//!
//! The file name is never consulted: a `.pdf` holding zip data is a zip, a
//! `.zip` holding anything else is rejected.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::debug;

const TAR_BLOCK_SIZE: u64 = 512;

/// Compression layered on top of a tar stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TarCompression {
    None,
    Gzip,
    Bzip2,
    Xz,
    Lzma,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    Tar(TarCompression),
    SevenZ,
}

impl ArchiveKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ArchiveKind::Zip => "zip",
            ArchiveKind::Tar(TarCompression::None) => "tar",
            ArchiveKind::Tar(TarCompression::Gzip) => "tar.gz",
            ArchiveKind::Tar(TarCompression::Bzip2) => "tar.bz2",
            ArchiveKind::Tar(TarCompression::Xz) => "tar.xz",
            ArchiveKind::Tar(TarCompression::Lzma) => "tar.lzma",
            ArchiveKind::SevenZ => "7z",
        }
    }
}

pub const ZIP_MIME_TYPES: &[&str] = &[
    "application/zip",
    "application/x-zip",
    "application/x-zip-compressed",
];

pub const TAR_MIME_TYPES: &[&str] = &[
    "application/x-tar",
    "application/x-compressed-tar",
    "application/x-bzip-compressed-tar",
    "application/x-lzma-compressed-tar",
    "application/x-xz-compressed-tar",
    "application/gzip",
    "application/x-gzip",
    "application/x-bzip",
    "application/x-bzip2",
    "application/x-lzma",
    "application/x-xz",
];

pub const SEVEN_Z_MIME_TYPES: &[&str] = &["application/x-7z-compressed"];

/// Media type lookup used to classify archives.
pub trait MediaTypeDetector {
    /// MIME type of the file content, `None` when it cannot be determined.
    fn detect(&self, path: &Path) -> Option<String>;
}

/// Magic-byte detector backed by `infer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentDetector;

impl MediaTypeDetector for ContentDetector {
    fn detect(&self, path: &Path) -> Option<String> {
        let mime = match infer::get_from_path(path).ok().flatten() {
            Some(kind) => kind.mime_type(),
            None if is_empty_tar(path) => "application/x-tar",
            None => return None,
        };
        debug!("mime type of {}: {}", path.display(), mime);
        Some(mime.to_string())
    }
}

/// A tar without any entries is only its end-of-archive marker: two or more
/// zero blocks and no `ustar` magic for `infer` to find.
fn is_empty_tar(path: &Path) -> bool {
    let Ok(meta) = fs::metadata(path) else {
        return false;
    };
    let len = meta.len();
    if len < 2 * TAR_BLOCK_SIZE || len % TAR_BLOCK_SIZE != 0 {
        return false;
    }
    let mut head = [0u8; 2 * TAR_BLOCK_SIZE as usize];
    File::open(path)
        .and_then(|mut file| file.read_exact(&mut head))
        .map(|_| head.iter().all(|b| *b == 0))
        .unwrap_or(false)
}

/// Maps a MIME type onto one of the supported archive families.
pub fn classify_mime(mime: &str) -> Option<ArchiveKind> {
    if ZIP_MIME_TYPES.contains(&mime) {
        return Some(ArchiveKind::Zip);
    }
    if SEVEN_Z_MIME_TYPES.contains(&mime) {
        return Some(ArchiveKind::SevenZ);
    }
    if !TAR_MIME_TYPES.contains(&mime) {
        return None;
    }
    let compression = match mime {
        "application/x-tar" => TarCompression::None,
        "application/x-compressed-tar" | "application/gzip" | "application/x-gzip" => {
            TarCompression::Gzip
        }
        "application/x-bzip-compressed-tar" | "application/x-bzip" | "application/x-bzip2" => {
            TarCompression::Bzip2
        }
        "application/x-xz-compressed-tar" | "application/x-xz" => TarCompression::Xz,
        _ => TarCompression::Lzma,
    };
    Some(ArchiveKind::Tar(compression))
}

pub fn detect_archive_kind(detector: &dyn MediaTypeDetector, path: &Path) -> Option<ArchiveKind> {
    detector.detect(path).as_deref().and_then(classify_mime)
}

/// Writer selection from a user supplied suffix such as `tar.gz`.
pub fn writer_kind_for_suffix(suffix: &str) -> Option<ArchiveKind> {
    match suffix {
        "zip" => Some(ArchiveKind::Zip),
        "tar" => Some(ArchiveKind::Tar(TarCompression::None)),
        "tar.gz" => Some(ArchiveKind::Tar(TarCompression::Gzip)),
        "tar.bz2" => Some(ArchiveKind::Tar(TarCompression::Bzip2)),
        "tar.xz" => Some(ArchiveKind::Tar(TarCompression::Xz)),
        "7z" => Some(ArchiveKind::SevenZ),
        _ => None,
    }
}
