use std::collections::BTreeMap;
use std::io::{Seek, SeekFrom};
use std::path::Path;

use crate::common::error::{TagError, Result};
use crate::common::util::{open_ro, read_at};
use crate::id3v1::codec;
use crate::id3v1::genres::genre_name;
use crate::id3v1::layout::TAG_SIZE;
use crate::id3v1::record::TagRecord;

/// Decoded ID3v1 fields keyed by name; a field may carry several values.
pub type FieldMap = BTreeMap<String, Vec<String>>;

/// Result of analyzing a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub file_size: u64,
    /// The legacy trailer tag, if the file has one.
    pub legacy_tag: Option<FieldMap>,
}

/// Anything that can inspect a file and report its size and ID3v1 fields.
pub trait TagAnalyzer {
    fn analyze(&self, path: &Path) -> Result<Analysis>;
}

/// Built-in analyzer that only looks at the 128-byte trailer.
/// Reads space-padded tags written by older taggers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailerAnalyzer;

impl TagAnalyzer for TrailerAnalyzer {
    fn analyze(&self, path: &Path) -> Result<Analysis> {
        let path_str = path.to_str().ok_or_else(|| {
            TagError::AnalyzerFailure(format!("non UTF-8 path: {}", path.display()))
        })?;
        let mut file = open_ro(path_str)?;

        // Seek to the end instead of trusting metadata
        let file_size = file.seek(SeekFrom::End(0))?;
        if file_size < TAG_SIZE as u64 {
            return Ok(Analysis { file_size, legacy_tag: None });
        }

        let mut buf = [0u8; TAG_SIZE];
        read_at(&mut file, file_size - TAG_SIZE as u64, &mut buf)?;
        let legacy_tag = codec::decode_lenient(&buf).map(|r| record_to_fields(&r));

        Ok(Analysis { file_size, legacy_tag })
    }
}

/// Flatten a record into the analyzer's field map. Empty text fields are
/// left out.
pub fn record_to_fields(record: &TagRecord) -> FieldMap {
    let mut fields = FieldMap::new();
    let text = [
        ("title", &record.title),
        ("artist", &record.artist),
        ("album", &record.album),
        ("year", &record.year),
        ("comment", &record.comment),
    ];
    for (key, value) in text {
        if !value.is_empty() {
            fields.insert(key.to_string(), vec![value.clone()]);
        }
    }

    if let Some(track) = record.track {
        let mut buf = itoa::Buffer::new();
        fields.insert("track_number".into(), vec![buf.format(track.get()).to_string()]);
    }
    if let Some(id) = record.genre {
        let mut buf = itoa::Buffer::new();
        fields.insert("genreid".into(), vec![buf.format(id).to_string()]);
        if let Some(name) = genre_name(id) {
            fields.insert("genre".into(), vec![name.to_string()]);
        }
    }
    fields
}

/// Join multi-valued fields with commas.
pub fn flatten_fields(fields: &FieldMap) -> impl Iterator<Item = (&str, String)> {
    fields.iter().map(|(k, v)| (k.as_str(), v.join(",")))
}
