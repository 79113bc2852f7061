use std::path::Path;

use log::debug;

use crate::common::error::{TagError, Result};
use crate::id3v1::analyzer::{flatten_fields, TagAnalyzer};
use crate::id3v1::options::SpliceOptions;
use crate::id3v1::record::TagRecord;
use crate::id3v1::splice::write_trailer_with;

/// Rewrite an existing trailer so unused bytes are NUL rather than spaces.
///
/// The current fields come from `analyzer`; multi-valued fields are joined
/// with commas. Fails with `NoExistingTag` (and writes nothing) when the
/// analyzer finds no trailer.
pub fn fix_padding(path: &str, analyzer: &dyn TagAnalyzer, options: &SpliceOptions) -> Result<()> {
    let analysis = analyzer
        .analyze(Path::new(path))
        .map_err(TagError::into_analyzer_failure)?;

    let fields = analysis
        .legacy_tag
        .ok_or_else(|| TagError::NoExistingTag(path.to_string()))?;

    let record = TagRecord::from_fields(flatten_fields(&fields));
    debug!("{}: re-encoding ID3v1 tag with NUL padding", path);
    write_trailer_with(path, &record, analyzer, options)
}
