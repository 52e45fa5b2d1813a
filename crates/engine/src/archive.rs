//! Archived source files
//!
//! A source file is either plain text or an archive holding the text as its
//! first regular file. Archives are expanded into the scratch directory and
//! the expanded copy is owned by an [`ExtractedFile`] guard, which deletes it
//! when dropped. Dropping happens at the end of each file's load step,
//! whether the step succeeded or not.
//!
//! Supported archive formats:
//! - `.zip`
//! - `.tar.zst` / `.tzst`

use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use lexset_core::{LexsetError, LexsetResult};

/// How a source file must be opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Plain text, streamed directly
    Plain,
    /// Zip archive
    Zip,
    /// Zstandard-compressed tarball
    TarZst,
}

impl SourceKind {
    /// Classify a path by its extension (case-insensitive)
    pub fn detect(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if name.ends_with(".zip") {
            SourceKind::Zip
        } else if name.ends_with(".tar.zst") || name.ends_with(".tzst") {
            SourceKind::TarZst
        } else {
            SourceKind::Plain
        }
    }
}

/// Expanded archive member; removed from disk on drop
#[derive(Debug)]
pub struct ExtractedFile {
    path: PathBuf,
}

impl ExtractedFile {
    /// Location of the expanded file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ExtractedFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(target: "lexset::load", path = %self.path.display(), "Removed expanded file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                target: "lexset::load",
                path = %self.path.display(),
                error = %e,
                "Failed to remove expanded file"
            ),
        }
    }
}

/// A source file ready to be streamed
#[derive(Debug)]
pub enum SourceFile {
    /// Read in place
    Plain(PathBuf),
    /// Read from the scratch directory
    Extracted(ExtractedFile),
}

impl SourceFile {
    /// Path to read lines from
    pub fn path(&self) -> &Path {
        match self {
            SourceFile::Plain(path) => path,
            SourceFile::Extracted(file) => file.path(),
        }
    }
}

/// Prepare a discovered file for streaming, expanding archives into `scratch`
///
/// # Errors
///
/// - `Io` if the archive cannot be read or is corrupt
/// - `InvalidInput` if the archive contains no regular file
pub fn open_source(path: &Path, scratch: &Path) -> LexsetResult<SourceFile> {
    match SourceKind::detect(path) {
        SourceKind::Plain => Ok(SourceFile::Plain(path.to_path_buf())),
        SourceKind::Zip => extract_zip(path, scratch).map(SourceFile::Extracted),
        SourceKind::TarZst => extract_tar_zst(path, scratch).map(SourceFile::Extracted),
    }
}

/// Create the scratch copy for an archive member and fill it from `reader`
///
/// Only the final path component of the member name is used, so members
/// named with `..` or absolute paths cannot escape the scratch directory.
fn write_member(
    archive: &Path,
    scratch: &Path,
    member_name: Option<OsString>,
    reader: &mut impl io::Read,
) -> LexsetResult<ExtractedFile> {
    let name = member_name.unwrap_or_else(|| OsString::from("extracted.txt"));
    let path = scratch.join(name);
    let mut out = File::create(&path).map_err(|e| LexsetError::io(&path, e))?;
    // Guard exists before the copy so a failed copy still cleans up
    let extracted = ExtractedFile { path };
    io::copy(reader, &mut out).map_err(|e| LexsetError::io(archive, e))?;
    debug!(
        target: "lexset::load",
        archive = %archive.display(),
        path = %extracted.path.display(),
        "Expanded archive member"
    );
    Ok(extracted)
}

fn empty_archive(archive: &Path) -> LexsetError {
    LexsetError::invalid_input(format!(
        "Archive '{}' contains no regular file",
        archive.display()
    ))
}

fn extract_zip(archive: &Path, scratch: &Path) -> LexsetResult<ExtractedFile> {
    let corrupt = |e: zip::result::ZipError| {
        LexsetError::io(archive, io::Error::new(io::ErrorKind::InvalidData, e))
    };

    let file = File::open(archive).map_err(|e| LexsetError::io(archive, e))?;
    let mut zip = zip::ZipArchive::new(file).map_err(corrupt)?;
    for i in 0..zip.len() {
        let mut member = zip.by_index(i).map_err(corrupt)?;
        if member.is_dir() {
            continue;
        }
        let name = member
            .enclosed_name()
            .and_then(|p| p.file_name())
            .map(|n| n.to_os_string());
        return write_member(archive, scratch, name, &mut member);
    }
    Err(empty_archive(archive))
}

fn extract_tar_zst(archive: &Path, scratch: &Path) -> LexsetResult<ExtractedFile> {
    let file = File::open(archive).map_err(|e| LexsetError::io(archive, e))?;
    let decoder =
        zstd::stream::read::Decoder::new(file).map_err(|e| LexsetError::io(archive, e))?;
    let mut tar = tar::Archive::new(decoder);
    for member in tar.entries().map_err(|e| LexsetError::io(archive, e))? {
        let mut member = member.map_err(|e| LexsetError::io(archive, e))?;
        if !member.header().entry_type().is_file() {
            continue;
        }
        let name = member
            .path()
            .map_err(|e| LexsetError::io(archive, e))?
            .file_name()
            .map(|n| n.to_os_string());
        return write_member(archive, scratch, name, &mut member);
    }
    Err(empty_archive(archive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use tempfile::TempDir;

    fn write_zip(path: &Path, members: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        for (name, content) in members {
            zip.start_file(*name, zip::write::FileOptions::default())
                .unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    fn write_tar_zst(path: &Path, name: &str, content: &str) {
        let file = File::create(path).unwrap();
        let encoder = zstd::stream::write::Encoder::new(file, 0).unwrap();
        let mut builder = tar::Builder::new(encoder);
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, content.as_bytes())
            .unwrap();
        builder.into_inner().unwrap().finish().unwrap();
    }

    fn read(path: &Path) -> String {
        let mut s = String::new();
        File::open(path).unwrap().read_to_string(&mut s).unwrap();
        s
    }

    #[test]
    fn test_detect_kind() {
        assert_eq!(SourceKind::detect(Path::new("a/names.txt")), SourceKind::Plain);
        assert_eq!(SourceKind::detect(Path::new("names.ZIP")), SourceKind::Zip);
        assert_eq!(SourceKind::detect(Path::new("names.tar.zst")), SourceKind::TarZst);
        assert_eq!(SourceKind::detect(Path::new("names.tzst")), SourceKind::TarZst);
        assert_eq!(SourceKind::detect(Path::new("names")), SourceKind::Plain);
    }

    #[test]
    fn test_plain_file_is_not_copied() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "x\n").unwrap();
        let source = open_source(&path, dir.path()).unwrap();
        assert!(matches!(source, SourceFile::Plain(_)));
        assert_eq!(source.path(), path);
    }

    #[test]
    fn test_zip_first_member_extracted_and_removed() {
        let src = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let archive = src.path().join("names.zip");
        write_zip(&archive, &[("names.txt", "alpha\nbeta\n"), ("other.txt", "gamma\n")]);

        let source = open_source(&archive, scratch.path()).unwrap();
        let extracted = source.path().to_path_buf();
        assert_eq!(extracted, scratch.path().join("names.txt"));
        assert_eq!(read(&extracted), "alpha\nbeta\n");

        drop(source);
        assert!(!extracted.exists());
        assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_zip_member_path_is_flattened() {
        let src = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let archive = src.path().join("nested.zip");
        write_zip(&archive, &[("inner/dir/list.txt", "one\n")]);

        let source = open_source(&archive, scratch.path()).unwrap();
        assert_eq!(source.path(), scratch.path().join("list.txt"));
    }

    #[test]
    fn test_empty_zip_is_invalid_input() {
        let src = TempDir::new().unwrap();
        let archive = src.path().join("empty.zip");
        write_zip(&archive, &[]);
        let err = open_source(&archive, src.path()).unwrap_err();
        assert_eq!(err.kind(), lexset_core::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_corrupt_zip_is_io_error() {
        let src = TempDir::new().unwrap();
        let archive = src.path().join("broken.zip");
        std::fs::write(&archive, b"not a zip file at all").unwrap();
        let err = open_source(&archive, src.path()).unwrap_err();
        assert_eq!(err.kind(), lexset_core::ErrorKind::Io);
        assert!(err.to_string().contains("broken.zip"));
    }

    #[test]
    fn test_tar_zst_extracted_and_removed() {
        let src = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let archive = src.path().join("names.tar.zst");
        write_tar_zst(&archive, "names.txt", "delta\n");

        let source = open_source(&archive, scratch.path()).unwrap();
        let extracted = source.path().to_path_buf();
        assert_eq!(read(&extracted), "delta\n");
        drop(source);
        assert!(!extracted.exists());
    }

    #[test]
    fn test_guard_tolerates_already_removed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.txt");
        std::fs::write(&path, "x").unwrap();
        let guard = ExtractedFile { path: path.clone() };
        std::fs::remove_file(&path).unwrap();
        drop(guard);
    }
}
