use crate::system::detect::{ArchiveKind, TarCompression};
use crate::system::tree::{normalize_entry_name, ArchiveDirectory, ArchiveNode};
use crate::utils::error::{ArchiveNavError, Result};
use bzip2::read::BzDecoder;
use bzip2::write::BzEncoder;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use sevenz_rust2::Password as SevenZPassword;
use sevenz_rust2::{SevenZArchiveEntry, SevenZReader, SevenZWriter};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tar::{Archive as TarArchive, Builder as TarBuilder};
use tracing::{debug, warn};
use xz2::read::XzDecoder;
use xz2::stream::Stream as XzStream;
use xz2::write::XzEncoder;
use zip::write::SimpleFileOptions as ZipFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub path: String,
    pub size: u64,
    pub is_dir: bool,
}

#[derive(Debug, Clone)]
struct LocalItem {
    source_path: PathBuf,
    archive_path: String,
    is_dir: bool,
}

#[derive(Debug, Clone)]
struct CopyPlan {
    source: String,
    is_dir: bool,
    target: PathBuf,
}

impl CopyPlan {
    fn target_for(&self, entry_path: &str) -> Option<PathBuf> {
        if self.source.is_empty() {
            return Some(join_relative(&self.target, entry_path));
        }
        if entry_path == self.source {
            return Some(self.target.clone());
        }
        if !self.is_dir {
            return None;
        }
        entry_path
            .strip_prefix(self.source.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .map(|rest| join_relative(&self.target, rest))
    }
}

/// Archive opened for reading: its kind and the reconstructed directory tree.
///
/// Entry data is streamed from disk on every copy; no file handle is kept
/// open between operations.
#[derive(Debug, Clone)]
pub struct OpenArchive {
    path: PathBuf,
    kind: ArchiveKind,
    root: ArchiveDirectory,
}

pub fn open_archive(path: &Path, kind: ArchiveKind) -> Result<OpenArchive> {
    let entries = list_entries(path, kind)?;
    debug!(
        "opened {} archive {} ({} entries)",
        kind.display_name(),
        path.display(),
        entries.len()
    );
    let root = ArchiveDirectory::from_entries(
        entries
            .iter()
            .map(|entry| (entry.path.as_str(), entry.is_dir, entry.size)),
    );
    Ok(OpenArchive {
        path: path.to_path_buf(),
        kind,
        root,
    })
}

pub fn list_entries(path: &Path, kind: ArchiveKind) -> Result<Vec<ArchiveEntry>> {
    match kind {
        ArchiveKind::Zip => list_zip_entries(path),
        ArchiveKind::Tar(compression) => list_tar_entries(path, compression),
        ArchiveKind::SevenZ => list_7z_entries(path),
    }
}

impl OpenArchive {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ArchiveKind {
        self.kind
    }

    pub fn root(&self) -> &ArchiveDirectory {
        &self.root
    }

    /// Copies the requested entries into `dest_dir`.
    ///
    /// A file lands at `dest_dir/<name>`, a directory is copied recursively to
    /// `dest_dir/<name>/`. Paths that do not resolve in the tree are skipped.
    /// When two requests share a base name only the first one is copied.
    /// Returns the produced paths in request order, without duplicates.
    pub fn copy_entries_to<S: AsRef<str>>(
        &self,
        paths: &[S],
        dest_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let mut plans: Vec<CopyPlan> = Vec::new();
        for requested in paths {
            let requested = requested.as_ref();
            let Some(node) = self.root.find(requested) else {
                debug!("entry not found in {}: {}", self.path.display(), requested);
                continue;
            };
            let target = dest_dir.join(node.name());
            if plans.iter().any(|plan| plan.target == target) {
                debug!("{} already requested as {}", requested, target.display());
                continue;
            }
            plans.push(CopyPlan {
                source: node.path().to_string(),
                is_dir: node.is_dir(),
                target,
            });
        }
        if plans.is_empty() {
            return Ok(Vec::new());
        }

        create_target_dir(dest_dir)?;
        for plan in &plans {
            if let Some(ArchiveNode::Directory(dir)) = self.root.find(&plan.source) {
                create_directory_skeleton(dir, &plan.target)?;
            }
        }
        self.copy_with_plans(&plans, dest_dir)?;
        Ok(plans.into_iter().map(|plan| plan.target).collect())
    }

    /// Copies the whole tree into `dest_dir`, replacing existing files.
    /// Returns the number of archive entries written.
    pub fn copy_all_to(&self, dest_dir: &Path) -> Result<usize> {
        create_target_dir(dest_dir)?;
        create_directory_skeleton(&self.root, dest_dir)?;
        let plans = [CopyPlan {
            source: String::new(),
            is_dir: true,
            target: dest_dir.to_path_buf(),
        }];
        self.copy_with_plans(&plans, dest_dir)
    }

    fn copy_with_plans(&self, plans: &[CopyPlan], dest_dir: &Path) -> Result<usize> {
        let mut written = 0usize;
        self.for_each_entry(dest_dir, |name, is_dir, reader| {
            let targets: Vec<PathBuf> = plans
                .iter()
                .filter_map(|plan| plan.target_for(name))
                .collect();
            match targets.as_slice() {
                [] => return Ok(()),
                [target] => write_entry(target, is_dir, reader)?,
                _ => {
                    // 같은 항목이 여러 요청에 겹치면 한 번 읽어서 나눠 쓴다
                    let mut data = Vec::new();
                    if !is_dir {
                        reader.read_to_end(&mut data)?;
                    }
                    for target in &targets {
                        write_entry(target, is_dir, &mut data.as_slice())?;
                    }
                }
            }
            written += 1;
            Ok(())
        })?;
        debug!(
            "copied {} entries from {} to {}",
            written,
            self.path.display(),
            dest_dir.display()
        );
        Ok(written)
    }

    /// Streams every safe, non-empty entry of the archive through `visit`.
    fn for_each_entry<F>(&self, dest_dir: &Path, mut visit: F) -> Result<()>
    where
        F: FnMut(&str, bool, &mut dyn Read) -> Result<()>,
    {
        match self.kind {
            ArchiveKind::Zip => {
                let file = File::open(&self.path)?;
                let mut archive =
                    ZipArchive::new(file).map_err(|e| extract_failed(&self.path, e))?;
                for idx in 0..archive.len() {
                    let mut entry = archive
                        .by_index(idx)
                        .map_err(|e| extract_failed(&self.path, e))?;
                    let Some(name) = safe_entry_name(entry.name()) else {
                        continue;
                    };
                    let is_dir = entry.is_dir();
                    visit(&name, is_dir, &mut entry)?;
                }
                Ok(())
            }
            ArchiveKind::Tar(compression) => {
                let reader = open_tar_stream(&self.path, compression)?;
                let mut archive = TarArchive::new(reader);
                for entry_result in archive
                    .entries()
                    .map_err(|e| extract_failed(&self.path, e))?
                {
                    let mut entry = entry_result.map_err(|e| extract_failed(&self.path, e))?;
                    let entry_type = entry.header().entry_type();
                    if !entry_type.is_file() && !entry_type.is_dir() {
                        continue;
                    }
                    let raw = entry
                        .path()
                        .map_err(|e| extract_failed(&self.path, e))?
                        .to_string_lossy()
                        .into_owned();
                    let Some(name) = safe_entry_name(&raw) else {
                        continue;
                    };
                    visit(&name, entry_type.is_dir(), &mut entry)?;
                }
                Ok(())
            }
            ArchiveKind::SevenZ => {
                let file = File::open(&self.path)?;
                let mut failure: Option<ArchiveNavError> = None;
                let mut extract_fn = |entry: &SevenZArchiveEntry,
                                      reader: &mut dyn Read,
                                      _output_path: &PathBuf|
                 -> std::result::Result<bool, sevenz_rust2::Error> {
                    if let Some(name) = safe_entry_name(&entry.name) {
                        if let Err(e) = visit(&name, entry.is_directory, reader) {
                            failure = Some(e);
                            return Ok(false);
                        }
                    }
                    // 읽지 않은 데이터는 버려야 다음 항목으로 넘어간다
                    if let Err(e) = io::copy(reader, &mut io::sink()) {
                        failure = Some(ArchiveNavError::Io(e));
                        return Ok(false);
                    }
                    Ok(true)
                };
                let result =
                    sevenz_rust2::decompress_with_extract_fn(file, dest_dir, &mut extract_fn);
                if let Some(error) = failure {
                    return Err(error);
                }
                result.map_err(|e| extract_failed(&self.path, e))
            }
        }
    }
}

/// Archive output opened for writing.
pub trait ArchiveWriter {
    fn add_file(&mut self, local_path: &Path, archive_name: &str) -> Result<()>;

    /// Adds `local_path` and everything below it under `archive_name`.
    fn add_directory(&mut self, local_path: &Path, archive_name: &str) -> Result<()>;

    /// Flushes the archive and returns its path.
    fn finish(self: Box<Self>) -> Result<PathBuf>;
}

pub fn open_writer(output_path: &Path, kind: ArchiveKind) -> Result<Box<dyn ArchiveWriter>> {
    let writer: Box<dyn ArchiveWriter> = match kind {
        ArchiveKind::Zip => Box::new(ZipArchiveWriter::create(output_path)?),
        ArchiveKind::Tar(compression) => {
            Box::new(TarArchiveWriter::create(output_path, compression)?)
        }
        ArchiveKind::SevenZ => Box::new(SevenZArchiveWriter::create(output_path)?),
    };
    debug!(
        "opened {} writer for {}",
        kind.display_name(),
        output_path.display()
    );
    Ok(writer)
}

struct ZipArchiveWriter {
    path: PathBuf,
    writer: ZipWriter<File>,
    options: ZipFileOptions,
}

impl ZipArchiveWriter {
    fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| write_failed(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: ZipWriter::new(file),
            options: ZipFileOptions::default().compression_method(CompressionMethod::Deflated),
        })
    }
}

impl ArchiveWriter for ZipArchiveWriter {
    fn add_file(&mut self, local_path: &Path, archive_name: &str) -> Result<()> {
        self.writer
            .start_file(archive_name.to_string(), self.options)
            .map_err(|e| write_failed(&self.path, e))?;
        let mut src = File::open(local_path)?;
        io::copy(&mut src, &mut self.writer).map_err(|e| write_failed(&self.path, e))?;
        Ok(())
    }

    fn add_directory(&mut self, local_path: &Path, archive_name: &str) -> Result<()> {
        for item in collect_local_items(local_path, archive_name)? {
            if item.is_dir {
                self.writer
                    .add_directory(format!("{}/", item.archive_path), self.options)
                    .map_err(|e| write_failed(&self.path, e))?;
            } else {
                self.add_file(&item.source_path, &item.archive_path)?;
            }
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<PathBuf> {
        let Self { path, writer, .. } = *self;
        writer.finish().map_err(|e| write_failed(&path, e))?;
        Ok(path)
    }
}

enum TarSink {
    Plain(File),
    Gzip(GzEncoder<File>),
    Bzip2(BzEncoder<File>),
    Xz(XzEncoder<File>),
}

impl TarSink {
    fn finish(self) -> io::Result<()> {
        match self {
            TarSink::Plain(mut file) => file.flush(),
            TarSink::Gzip(encoder) => encoder.finish().map(|_| ()),
            TarSink::Bzip2(encoder) => encoder.finish().map(|_| ()),
            TarSink::Xz(encoder) => encoder.finish().map(|_| ()),
        }
    }
}

impl Write for TarSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            TarSink::Plain(w) => w.write(buf),
            TarSink::Gzip(w) => w.write(buf),
            TarSink::Bzip2(w) => w.write(buf),
            TarSink::Xz(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            TarSink::Plain(w) => w.flush(),
            TarSink::Gzip(w) => w.flush(),
            TarSink::Bzip2(w) => w.flush(),
            TarSink::Xz(w) => w.flush(),
        }
    }
}

struct TarArchiveWriter {
    path: PathBuf,
    builder: TarBuilder<TarSink>,
}

impl TarArchiveWriter {
    fn create(path: &Path, compression: TarCompression) -> Result<Self> {
        if compression == TarCompression::Lzma {
            return Err(ArchiveNavError::UnsupportedSuffix {
                suffix: "tar.lzma".to_string(),
            });
        }
        let file = File::create(path).map_err(|e| write_failed(path, e))?;
        let sink = match compression {
            TarCompression::Gzip => TarSink::Gzip(GzEncoder::new(file, Compression::default())),
            TarCompression::Bzip2 => {
                TarSink::Bzip2(BzEncoder::new(file, bzip2::Compression::default()))
            }
            TarCompression::Xz => TarSink::Xz(XzEncoder::new(file, 6)),
            TarCompression::None | TarCompression::Lzma => TarSink::Plain(file),
        };
        Ok(Self {
            path: path.to_path_buf(),
            builder: TarBuilder::new(sink),
        })
    }
}

impl ArchiveWriter for TarArchiveWriter {
    fn add_file(&mut self, local_path: &Path, archive_name: &str) -> Result<()> {
        self.builder
            .append_path_with_name(local_path, archive_name)
            .map_err(|e| write_failed(&self.path, e))
    }

    fn add_directory(&mut self, local_path: &Path, archive_name: &str) -> Result<()> {
        for item in collect_local_items(local_path, archive_name)? {
            if item.is_dir {
                self.builder
                    .append_dir(&item.archive_path, &item.source_path)
                    .map_err(|e| write_failed(&self.path, e))?;
            } else {
                self.add_file(&item.source_path, &item.archive_path)?;
            }
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<PathBuf> {
        let Self { path, builder } = *self;
        let sink = builder.into_inner().map_err(|e| write_failed(&path, e))?;
        sink.finish().map_err(|e| write_failed(&path, e))?;
        Ok(path)
    }
}

struct SevenZArchiveWriter {
    path: PathBuf,
    writer: SevenZWriter<File>,
}

impl SevenZArchiveWriter {
    fn create(path: &Path) -> Result<Self> {
        let writer = SevenZWriter::create(path).map_err(|e| write_failed(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }
}

impl ArchiveWriter for SevenZArchiveWriter {
    fn add_file(&mut self, local_path: &Path, archive_name: &str) -> Result<()> {
        let src = File::open(local_path)?;
        let entry = SevenZArchiveEntry::from_path(local_path, archive_name.to_string());
        self.writer
            .push_archive_entry(entry, Some(src))
            .map_err(|e| write_failed(&self.path, e))?;
        Ok(())
    }

    fn add_directory(&mut self, local_path: &Path, archive_name: &str) -> Result<()> {
        for item in collect_local_items(local_path, archive_name)? {
            if item.is_dir {
                let entry =
                    SevenZArchiveEntry::from_path(&item.source_path, item.archive_path.clone());
                self.writer
                    .push_archive_entry::<File>(entry, None)
                    .map_err(|e| write_failed(&self.path, e))?;
            } else {
                self.add_file(&item.source_path, &item.archive_path)?;
            }
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<PathBuf> {
        let Self { path, writer } = *self;
        writer.finish().map_err(|e| write_failed(&path, e))?;
        Ok(path)
    }
}

fn collect_local_items(local_path: &Path, archive_name: &str) -> Result<Vec<LocalItem>> {
    let mut items = Vec::new();
    collect_local_item_recursive(local_path, archive_name, &mut items)?;
    Ok(items)
}

fn collect_local_item_recursive(
    source_path: &Path,
    archive_path: &str,
    out: &mut Vec<LocalItem>,
) -> Result<()> {
    let meta = fs::metadata(source_path)?;
    if !meta.is_dir() {
        out.push(LocalItem {
            source_path: source_path.to_path_buf(),
            archive_path: archive_path.to_string(),
            is_dir: false,
        });
        return Ok(());
    }

    out.push(LocalItem {
        source_path: source_path.to_path_buf(),
        archive_path: archive_path.to_string(),
        is_dir: true,
    });
    let mut children = fs::read_dir(source_path)?.collect::<io::Result<Vec<_>>>()?;
    children.sort_by_key(|entry| entry.file_name());
    for child in children {
        let name = child.file_name().to_string_lossy().into_owned();
        let child_archive = format!("{}/{}", archive_path, name);
        collect_local_item_recursive(&child.path(), &child_archive, out)?;
    }
    Ok(())
}

fn create_directory_skeleton(dir: &ArchiveDirectory, target: &Path) -> Result<()> {
    create_target_dir(target)?;
    for node in dir.entries() {
        if let ArchiveNode::Directory(child) = node {
            create_directory_skeleton(child, &target.join(child.name()))?;
        }
    }
    Ok(())
}

/// Destination-side failures are write errors, not archive read errors.
fn create_target_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| write_failed(path, e))
}

fn write_entry(target: &Path, is_dir: bool, reader: &mut dyn Read) -> Result<()> {
    if is_dir {
        return create_target_dir(target);
    }
    if let Some(parent) = target.parent() {
        create_target_dir(parent)?;
    }
    if target.is_dir() {
        fs::remove_dir_all(target).map_err(|e| write_failed(target, e))?;
    }
    let mut out = File::create(target).map_err(|e| write_failed(target, e))?;
    io::copy(reader, &mut out)?;
    Ok(())
}

fn join_relative(base: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(base.to_path_buf(), |acc, part| acc.join(part))
}

fn safe_entry_name(raw: &str) -> Option<String> {
    match normalize_entry_name(raw) {
        Some(name) if !name.is_empty() => Some(name),
        Some(_) => None,
        None => {
            warn!("skipping unsafe archive entry: {}", raw);
            None
        }
    }
}

fn open_tar_stream(path: &Path, compression: TarCompression) -> Result<Box<dyn Read>> {
    let file = File::open(path)?;
    let reader: Box<dyn Read> = match compression {
        TarCompression::None => Box::new(file),
        TarCompression::Gzip => Box::new(GzDecoder::new(file)),
        TarCompression::Bzip2 => Box::new(BzDecoder::new(file)),
        TarCompression::Xz => Box::new(XzDecoder::new(file)),
        TarCompression::Lzma => {
            let stream = XzStream::new_lzma_decoder(u64::MAX).map_err(|e| {
                ArchiveNavError::ArchiveListFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            })?;
            Box::new(XzDecoder::new_stream(file, stream))
        }
    };
    Ok(reader)
}

fn list_zip_entries(path: &Path) -> Result<Vec<ArchiveEntry>> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| list_failed(path, e))?;

    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let entry = archive.by_index(i).map_err(|e| list_failed(path, e))?;
        entries.push(ArchiveEntry {
            path: entry.name().to_string(),
            size: entry.size(),
            is_dir: entry.is_dir(),
        });
    }
    Ok(entries)
}

fn list_tar_entries(path: &Path, compression: TarCompression) -> Result<Vec<ArchiveEntry>> {
    let reader = open_tar_stream(path, compression)?;
    let mut archive = TarArchive::new(reader);
    let mut entries = Vec::new();
    for entry_result in archive.entries().map_err(|e| list_failed(path, e))? {
        let entry = entry_result.map_err(|e| list_failed(path, e))?;
        let entry_type = entry.header().entry_type();
        if !entry_type.is_file() && !entry_type.is_dir() {
            continue;
        }
        let entry_path = entry.path().map_err(|e| list_failed(path, e))?;
        entries.push(ArchiveEntry {
            path: entry_path.to_string_lossy().into_owned(),
            size: entry.size(),
            is_dir: entry_type.is_dir(),
        });
    }
    Ok(entries)
}

fn list_7z_entries(path: &Path) -> Result<Vec<ArchiveEntry>> {
    let file = File::open(path)?;
    let reader =
        SevenZReader::new(file, SevenZPassword::empty()).map_err(|e| list_failed(path, e))?;

    Ok(reader
        .archive()
        .files
        .iter()
        .map(|e| ArchiveEntry {
            path: e.name.clone(),
            size: e.size,
            is_dir: e.is_directory,
        })
        .collect())
}

fn list_failed(path: &Path, error: impl ToString) -> ArchiveNavError {
    ArchiveNavError::ArchiveListFailed {
        path: path.to_path_buf(),
        reason: error.to_string(),
    }
}

fn extract_failed(path: &Path, error: impl ToString) -> ArchiveNavError {
    ArchiveNavError::ArchiveExtractFailed {
        path: path.to_path_buf(),
        reason: error.to_string(),
    }
}

fn write_failed(path: &Path, error: impl ToString) -> ArchiveNavError {
    ArchiveNavError::ArchiveWriteFailed {
        path: path.to_path_buf(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn prepare_sample_sources(base: &Path) -> PathBuf {
        let src = base.join("src");
        fs::create_dir_all(src.join("nested").join("deeper")).expect("create nested dirs");
        fs::create_dir_all(src.join("empty")).expect("create empty dir");
        fs::write(src.join("alpha.txt"), b"alpha").expect("write alpha");
        fs::write(src.join("nested").join("beta.txt"), b"beta").expect("write beta");
        fs::write(src.join("nested").join("deeper").join("gamma.txt"), b"gamma")
            .expect("write gamma");
        src
    }

    fn build_archive(base: &Path, file_name: &str, kind: ArchiveKind) -> PathBuf {
        let src = prepare_sample_sources(base);
        let output = base.join(file_name);
        let mut writer = open_writer(&output, kind).expect("open writer");
        writer
            .add_file(&src.join("alpha.txt"), "alpha.txt")
            .expect("add alpha");
        writer
            .add_directory(&src.join("nested"), "nested")
            .expect("add nested");
        writer
            .add_directory(&src.join("empty"), "empty")
            .expect("add empty");
        writer.finish().expect("finish archive")
    }

    fn assert_sample_tree(archive: &OpenArchive) {
        let root = archive.root();
        assert!(root.find("alpha.txt").is_some_and(|n| !n.is_dir()));
        assert!(root.find("nested").is_some_and(ArchiveNode::is_dir));
        assert!(root.find("nested/beta.txt").is_some());
        assert!(root.find("nested/deeper/gamma.txt").is_some());
        assert!(root.find("empty").is_some_and(ArchiveNode::is_dir));
    }

    #[test]
    fn test_zip_write_and_open_roundtrip() {
        let temp = tempdir().expect("create tempdir");
        let path = build_archive(temp.path(), "sample.zip", ArchiveKind::Zip);
        let archive = open_archive(&path, ArchiveKind::Zip).expect("open zip");
        assert_eq!(archive.kind(), ArchiveKind::Zip);
        assert_sample_tree(&archive);
    }

    #[test]
    fn test_tar_variants_write_and_open_roundtrip() {
        for (file_name, compression) in [
            ("sample.tar", TarCompression::None),
            ("sample.tar.gz", TarCompression::Gzip),
            ("sample.tar.bz2", TarCompression::Bzip2),
            ("sample.tar.xz", TarCompression::Xz),
        ] {
            let temp = tempdir().expect("create tempdir");
            let kind = ArchiveKind::Tar(compression);
            let path = build_archive(temp.path(), file_name, kind);
            let archive = open_archive(&path, kind).expect("open tar");
            assert_sample_tree(&archive);
        }
    }

    #[test]
    fn test_7z_write_and_open_roundtrip() {
        let temp = tempdir().expect("create tempdir");
        let path = build_archive(temp.path(), "sample.7z", ArchiveKind::SevenZ);
        let archive = open_archive(&path, ArchiveKind::SevenZ).expect("open 7z");
        assert_sample_tree(&archive);
    }

    #[test]
    fn test_copy_entries_skips_missing() {
        let temp = tempdir().expect("create tempdir");
        let path = build_archive(temp.path(), "sample.zip", ArchiveKind::Zip);
        let archive = open_archive(&path, ArchiveKind::Zip).expect("open zip");
        let dest = temp.path().join("out");

        let produced = archive
            .copy_entries_to(&["nested/beta.txt", "missing.txt"], &dest)
            .expect("copy entries");
        assert_eq!(produced, vec![dest.join("beta.txt")]);
        assert_eq!(fs::read(dest.join("beta.txt")).expect("read beta"), b"beta");
    }

    #[test]
    fn test_copy_entries_directory_and_overlap() {
        let temp = tempdir().expect("create tempdir");
        let kind = ArchiveKind::Tar(TarCompression::Gzip);
        let path = build_archive(temp.path(), "sample.tar.gz", kind);
        let archive = open_archive(&path, kind).expect("open tar.gz");
        let dest = temp.path().join("out");

        let produced = archive
            .copy_entries_to(&["nested", "nested/deeper/gamma.txt", "nested"], &dest)
            .expect("copy entries");
        assert_eq!(produced, vec![dest.join("nested"), dest.join("gamma.txt")]);
        assert_eq!(
            fs::read(dest.join("nested").join("deeper").join("gamma.txt")).expect("read nested"),
            b"gamma"
        );
        assert_eq!(fs::read(dest.join("gamma.txt")).expect("read gamma"), b"gamma");
    }

    #[test]
    fn test_copy_entries_same_base_name_keeps_first() {
        let temp = tempdir().expect("create tempdir");
        let src = temp.path().join("src");
        fs::create_dir_all(&src).expect("create src");
        fs::write(src.join("x.txt"), b"X").expect("write x");
        fs::write(src.join("y.txt"), b"Y").expect("write y");
        let path = temp.path().join("twins.zip");
        let mut writer = open_writer(&path, ArchiveKind::Zip).expect("open writer");
        writer.add_file(&src.join("x.txt"), "a/f.txt").expect("add a/f.txt");
        writer.add_file(&src.join("y.txt"), "b/f.txt").expect("add b/f.txt");
        writer.finish().expect("finish archive");

        let archive = open_archive(&path, ArchiveKind::Zip).expect("open zip");
        let dest = temp.path().join("out");
        let produced = archive
            .copy_entries_to(&["a/f.txt", "b/f.txt"], &dest)
            .expect("copy entries");
        assert_eq!(produced, vec![dest.join("f.txt")]);
        assert_eq!(fs::read(dest.join("f.txt")).expect("read f"), b"X");
    }

    #[test]
    fn test_copy_all_into_blocked_destination_is_write_error() {
        let temp = tempdir().expect("create tempdir");
        let path = build_archive(temp.path(), "sample.zip", ArchiveKind::Zip);
        let archive = open_archive(&path, ArchiveKind::Zip).expect("open zip");
        let dest = temp.path().join("blocked");
        fs::create_dir_all(&dest).expect("create dest");
        // 아카이브의 디렉토리 자리에 일반 파일
        fs::write(dest.join("nested"), b"file").expect("write blocker");

        let result = archive.copy_all_to(&dest);
        assert!(matches!(
            result,
            Err(ArchiveNavError::ArchiveWriteFailed { .. })
        ));
    }

    #[test]
    fn test_copy_entries_nothing_found_creates_nothing() {
        let temp = tempdir().expect("create tempdir");
        let path = build_archive(temp.path(), "sample.zip", ArchiveKind::Zip);
        let archive = open_archive(&path, ArchiveKind::Zip).expect("open zip");
        let dest = temp.path().join("never");
        let produced = archive
            .copy_entries_to(&["nope"], &dest)
            .expect("copy entries");
        assert!(produced.is_empty());
        assert!(!dest.exists());
    }

    #[test]
    fn test_copy_all_overwrites_existing_files() {
        let temp = tempdir().expect("create tempdir");
        let path = build_archive(temp.path(), "sample.7z", ArchiveKind::SevenZ);
        let archive = open_archive(&path, ArchiveKind::SevenZ).expect("open 7z");
        let dest = temp.path().join("all");
        fs::create_dir_all(&dest).expect("create dest");
        fs::write(dest.join("alpha.txt"), b"stale").expect("write stale");

        archive.copy_all_to(&dest).expect("copy all");
        assert_eq!(fs::read(dest.join("alpha.txt")).expect("read alpha"), b"alpha");
        assert!(dest.join("nested").join("deeper").join("gamma.txt").exists());
        assert!(dest.join("empty").is_dir());
    }

    #[test]
    fn test_open_corrupt_zip_fails_with_list_error() {
        let temp = tempdir().expect("create tempdir");
        let path = temp.path().join("broken.zip");
        fs::write(&path, b"PK\x03\x04 definitely not a zip").expect("write broken");
        let result = open_archive(&path, ArchiveKind::Zip);
        assert!(matches!(
            result,
            Err(ArchiveNavError::ArchiveListFailed { .. })
        ));
    }

    #[test]
    fn test_lzma_writer_is_rejected() {
        let temp = tempdir().expect("create tempdir");
        let output = temp.path().join("out.tar.lzma");
        let result = open_writer(&output, ArchiveKind::Tar(TarCompression::Lzma));
        assert!(matches!(
            result,
            Err(ArchiveNavError::UnsupportedSuffix { .. })
        ));
    }

    #[test]
    fn test_join_relative() {
        let base = Path::new("/tmp/base");
        assert_eq!(
            join_relative(base, "a/b.txt"),
            PathBuf::from("/tmp/base/a/b.txt")
        );
    }
}
