//! Corpus loader: the write path
//!
//! Streams every discovered source file line by line, drops blank lines and
//! `#` comments, encodes the rest and submits them to the index in batches.
//!
//! # Failure semantics
//!
//! - Path problems (`SourceNotFound`, `NotADirectory`, scratch dir) are
//!   detected before the store is touched.
//! - Any other error aborts the whole load immediately. Files committed
//!   before the failure stay committed; a load is not atomic across files.
//! - Re-loading the same corpus without clearing is idempotent: the index is
//!   a set, so only genuinely new keys are counted as added.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use lexset_core::{encode_with_limits, CompositeKey, LexsetError, LexsetResult, Limits};
use lexset_storage::{OrderedIndex, SortedSet};

use crate::archive::open_source;
use crate::discovery::{discover_files, ensure_scratch_dir};

/// Keys per round trip when not configured
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Lines starting with this character are comments
pub const COMMENT_PREFIX: char = '#';

/// Knobs for a load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Keys per `insert_many` call; 0 sends each file as one batch
    pub batch_size: usize,
    /// Empty the index after path validation and before the first file
    pub clear_first: bool,
    /// Entry size limits
    pub limits: Limits,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            clear_first: false,
            limits: Limits::default(),
        }
    }
}

/// Per-file accounting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// File as discovered (the archive path for archives)
    pub path: PathBuf,
    /// Lines that survived filtering
    pub lines_loaded: u64,
    /// Keys the store reported as newly added
    pub items_added: u64,
}

/// Whole-load accounting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// One report per file, in load order
    pub files: Vec<FileReport>,
    /// Sum of `lines_loaded`
    pub total_lines_loaded: u64,
    /// Sum of `items_added`
    pub total_items_added: u64,
}

impl LoadReport {
    fn push(&mut self, file: FileReport) {
        self.total_lines_loaded += file.lines_loaded;
        self.total_items_added += file.items_added;
        self.files.push(file);
    }
}

/// Returns the entry a raw line contributes, or `None` for blanks and comments
pub fn filter_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
        None
    } else {
        Some(trimmed)
    }
}

/// Populates an index from source files
#[derive(Debug)]
pub struct CorpusLoader<'a, S> {
    index: &'a OrderedIndex<S>,
    options: LoadOptions,
}

impl<'a, S: SortedSet> CorpusLoader<'a, S> {
    /// Create a loader writing into `index`
    pub fn new(index: &'a OrderedIndex<S>, options: LoadOptions) -> Self {
        Self { index, options }
    }

    /// Load every regular file directly inside `source_dir`
    ///
    /// Archives are expanded into `scratch_dir`, which is created if needed.
    pub fn load_dir(&self, source_dir: &Path, scratch_dir: &Path) -> LexsetResult<LoadReport> {
        ensure_scratch_dir(scratch_dir)?;
        let files = discover_files(source_dir)?;
        info!(
            target: "lexset::load",
            source = %source_dir.display(),
            files = files.len(),
            "Loading corpus"
        );

        if self.options.clear_first {
            self.index.clear()?;
        }

        let mut report = LoadReport::default();
        for path in &files {
            let file = self.load_file(path, scratch_dir)?;
            info!(
                target: "lexset::load",
                path = %file.path.display(),
                lines_loaded = file.lines_loaded,
                items_added = file.items_added,
                "Loaded file"
            );
            report.push(file);
        }

        info!(
            target: "lexset::load",
            total_lines_loaded = report.total_lines_loaded,
            total_items_added = report.total_items_added,
            "Corpus loaded"
        );
        Ok(report)
    }

    /// Load one file, expanding it into `scratch_dir` first if it is an archive
    ///
    /// The expanded copy is removed before this returns, on success or error.
    pub fn load_file(&self, path: &Path, scratch_dir: &Path) -> LexsetResult<FileReport> {
        let source = open_source(path, scratch_dir)?;
        let file = File::open(source.path()).map_err(|e| LexsetError::io(source.path(), e))?;
        self.load_reader(BufReader::new(file), path)
    }

    /// Load lines from any buffered reader; `origin` names the source in reports and errors
    pub fn load_reader<R: BufRead>(&self, reader: R, origin: &Path) -> LexsetResult<FileReport> {
        let batch_size = self.options.batch_size;
        let mut pending: Vec<CompositeKey> =
            Vec::with_capacity(if batch_size == 0 { 1024 } else { batch_size });
        let mut lines_loaded = 0u64;
        let mut items_added = 0u64;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| LexsetError::io(origin, e))?;
            let Some(entry) = filter_line(&line) else {
                continue;
            };

            let key = encode_with_limits(entry, &self.options.limits).map_err(|e| {
                LexsetError::invalid_input(format!(
                    "{}:{}: {}",
                    origin.display(),
                    line_no + 1,
                    e
                ))
            })?;
            pending.push(key);
            lines_loaded += 1;

            if batch_size > 0 && pending.len() >= batch_size {
                items_added += self.flush(&mut pending, origin)?;
            }
        }
        items_added += self.flush(&mut pending, origin)?;

        Ok(FileReport {
            path: origin.to_path_buf(),
            lines_loaded,
            items_added,
        })
    }

    fn flush(&self, pending: &mut Vec<CompositeKey>, origin: &Path) -> LexsetResult<u64> {
        if pending.is_empty() {
            return Ok(0);
        }
        let added = self.index.insert_many(pending)?;
        debug!(
            target: "lexset::load",
            path = %origin.display(),
            batch = pending.len(),
            added,
            "Flushed batch"
        );
        pending.clear();
        Ok(added)
    }
}
