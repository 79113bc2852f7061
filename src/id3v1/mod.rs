//! ID3v1 trailer tags: the fixed 128-byte block at the end of a file.

pub mod analyzer;
pub mod codec;
pub mod genres;
pub mod layout;
pub mod options;
pub mod padding;
pub mod probe;
pub mod record;
pub mod splice;

use log::warn;

use crate::common::error::Result;
use crate::id3v1::analyzer::{TagAnalyzer, TrailerAnalyzer};
use crate::id3v1::options::SpliceOptions;
use crate::id3v1::record::TagRecord;

/// Write `record` as the ID3v1 tag of `path`, replacing any existing one.
pub fn write_tag(path: &str, record: &TagRecord) -> Result<()> {
    splice::write_trailer(path, record, &SpliceOptions::default())
}

/// Remove the ID3v1 tag from `path`. Succeeds when there is none.
pub fn remove_tag(path: &str) -> Result<()> {
    splice::remove_trailer(path, &SpliceOptions::default()).map(|_| ())
}

/// Re-write the ID3v1 tag of `path` with NUL padding.
pub fn fix_padding(path: &str) -> Result<()> {
    padding::fix_padding(path, &TrailerAnalyzer, &SpliceOptions::default())
}

/// Read the ID3v1 tag of `path`, if any.
pub fn read_tag(path: &str) -> Result<Option<TagRecord>> {
    splice::read_trailer(path)
}

/// Tag writer bound to a single file.
///
/// Keeps a running list of human-readable errors and of non-fatal warnings
/// (fields that had to be truncated or re-encoded).
pub struct Id3v1Writer {
    path: String,
    options: SpliceOptions,
    analyzer: Box<dyn TagAnalyzer + Send + Sync>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Id3v1Writer {
    pub fn new(path: impl Into<String>) -> Self {
        Id3v1Writer {
            path: path.into(),
            options: SpliceOptions::default(),
            analyzer: Box::new(TrailerAnalyzer),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn options(mut self, options: SpliceOptions) -> Self {
        self.options = options;
        self
    }

    /// Use a different analyzer for padding repair and as the size
    /// fallback when file metadata is unavailable.
    pub fn analyzer(mut self, analyzer: impl TagAnalyzer + Send + Sync + 'static) -> Self {
        self.analyzer = Box::new(analyzer);
        self
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn write(&mut self, record: &TagRecord) -> Result<()> {
        self.warnings.extend(record.truncation_warnings());
        let result = splice::write_trailer_with(&self.path, record, self.analyzer.as_ref(), &self.options);
        self.track(result)
    }

    /// Returns whether a tag was actually removed.
    pub fn remove(&mut self) -> Result<bool> {
        let result = splice::remove_trailer_with(&self.path, self.analyzer.as_ref(), &self.options);
        self.track(result)
    }

    pub fn fix_padding(&mut self) -> Result<()> {
        let result = padding::fix_padding(&self.path, self.analyzer.as_ref(), &self.options);
        self.track(result)
    }

    pub fn read(&mut self) -> Result<Option<TagRecord>> {
        let result = splice::read_trailer(&self.path);
        self.track(result)
    }

    fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            warn!("{}: {}", self.path, e);
            self.errors.push(e.to_string());
        }
        result
    }
}
