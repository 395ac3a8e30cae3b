// System Layer
pub mod archive;
pub mod detect;
pub mod tree;
pub mod workspace;

pub use archive::{
    list_entries, open_archive, open_writer, ArchiveEntry, ArchiveWriter, OpenArchive,
};
pub use detect::{
    classify_mime, detect_archive_kind, writer_kind_for_suffix, ArchiveKind, ContentDetector,
    MediaTypeDetector, TarCompression,
};
pub use tree::{ArchiveDirectory, ArchiveFile, ArchiveNode};
