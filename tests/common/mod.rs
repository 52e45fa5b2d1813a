//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub use lexset::{
    CorpusLoader, LoadOptions, LoadReport, MemorySortedSet, OrderedIndex, QueryEngine,
};

// ============================================================================
// Corpus - source and scratch directories in one temp dir
// ============================================================================

/// Temporary source directory plus scratch directory
pub struct Corpus {
    pub dir: TempDir,
}

impl Corpus {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();
        Self { dir }
    }

    pub fn source(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn scratch(&self) -> PathBuf {
        self.dir.path().join("tmp")
    }

    /// Write a plain text source file
    pub fn text(&self, name: &str, lines: &[&str]) -> PathBuf {
        let path = self.source().join(name);
        fs::write(&path, lines_to_text(lines)).unwrap();
        path
    }

    /// Write a zip source file holding one member
    pub fn zip(&self, name: &str, member: &str, lines: &[&str]) -> PathBuf {
        let path = self.source().join(name);
        let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
        zip.start_file(member, zip::write::FileOptions::default())
            .unwrap();
        zip.write_all(lines_to_text(lines).as_bytes()).unwrap();
        zip.finish().unwrap();
        path
    }

    /// Files left in the scratch directory
    pub fn scratch_entries(&self) -> usize {
        match fs::read_dir(self.scratch()) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }
}

fn lines_to_text(lines: &[&str]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

// ============================================================================
// Index helpers
// ============================================================================

pub fn memory_index() -> OrderedIndex<MemorySortedSet> {
    OrderedIndex::new(MemorySortedSet::new())
}

pub fn load(
    index: &OrderedIndex<MemorySortedSet>,
    corpus: &Corpus,
    options: LoadOptions,
) -> lexset::LexsetResult<LoadReport> {
    CorpusLoader::new(index, options).load_dir(&corpus.source(), &corpus.scratch())
}

pub fn search(index: &OrderedIndex<MemorySortedSet>, term: &str) -> Vec<String> {
    QueryEngine::new(index).search(term).unwrap()
}

pub fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}
