use std::fs::File;
use std::io;
use std::path::Path;

use log::{debug, warn};

use crate::common::error::{TagError, Result};
use crate::id3v1::analyzer::TagAnalyzer;
use crate::id3v1::options::SpliceOptions;

/// Exact byte length of an open file, range-checked against
/// `options.max_file_size`. When the file's own metadata cannot be read,
/// `analyzer` is asked for the size instead.
pub fn probe_size_with_fallback(
    fobj: &File,
    path: &str,
    analyzer: &dyn TagAnalyzer,
    options: &SpliceOptions,
) -> Result<u64> {
    resolve_size(fobj.metadata().map(|m| m.len()), path, analyzer, options)
}

/// Pick the size from `metadata`, or from `analyzer` if that failed, and
/// apply the range check.
pub fn resolve_size(
    metadata: io::Result<u64>,
    path: &str,
    analyzer: &dyn TagAnalyzer,
    options: &SpliceOptions,
) -> Result<u64> {
    let size = match metadata {
        Ok(len) => len,
        Err(e) => {
            warn!("metadata unavailable for {}: {}, scanning via analyzer", path, e);
            analyzer
                .analyze(Path::new(path))
                .map_err(TagError::into_analyzer_failure)?
                .file_size
        }
    };
    check_size(path, size, options)
}

fn check_size(path: &str, size: u64, options: &SpliceOptions) -> Result<u64> {
    if size >= options.max_file_size {
        return Err(TagError::FileTooLarge {
            path: path.to_string(),
            size,
            limit: options.max_file_size,
        });
    }
    debug!("{}: {} bytes", path, size);
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id3v1::analyzer::{Analysis, TrailerAnalyzer};
    use std::io::Write;

    struct FixedSize(u64);

    impl TagAnalyzer for FixedSize {
        fn analyze(&self, _path: &Path) -> Result<Analysis> {
            Ok(Analysis { file_size: self.0, legacy_tag: None })
        }
    }

    struct Unreadable;

    impl TagAnalyzer for Unreadable {
        fn analyze(&self, _path: &Path) -> Result<Analysis> {
            Err(TagError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")))
        }
    }

    fn no_metadata() -> io::Result<u64> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "stat failed"))
    }

    #[test]
    fn size_at_limit_is_rejected() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(&[0u8; 200]).unwrap();
        let path = tmp.path().to_str().unwrap().to_string();

        let under = SpliceOptions::default().with_max_file_size(201);
        let size = probe_size_with_fallback(tmp.as_file(), &path, &TrailerAnalyzer, &under);
        assert_eq!(size.unwrap(), 200);

        let at = SpliceOptions::default().with_max_file_size(200);
        match probe_size_with_fallback(tmp.as_file(), &path, &TrailerAnalyzer, &at) {
            Err(TagError::FileTooLarge { size, limit, .. }) => {
                assert_eq!(size, 200);
                assert_eq!(limit, 200);
            }
            other => panic!("expected FileTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn metadata_wins_over_analyzer() {
        let options = SpliceOptions::default();
        let size = resolve_size(Ok(42), "a.mp3", &FixedSize(9999), &options).unwrap();
        assert_eq!(size, 42);
    }

    #[test]
    fn analyzer_size_used_when_metadata_fails() {
        let options = SpliceOptions::default().with_max_file_size(1000);
        let size = resolve_size(no_metadata(), "a.mp3", &FixedSize(640), &options).unwrap();
        assert_eq!(size, 640);

        // The fallback size is still range-checked
        let err = resolve_size(no_metadata(), "a.mp3", &FixedSize(1000), &options).unwrap_err();
        assert!(matches!(err, TagError::FileTooLarge { size: 1000, .. }));
    }

    #[test]
    fn analyzer_error_becomes_analyzer_failure() {
        let options = SpliceOptions::default();
        let err = resolve_size(no_metadata(), "a.mp3", &Unreadable, &options).unwrap_err();
        match err {
            TagError::AnalyzerFailure(msg) => assert!(msg.contains("denied")),
            other => panic!("expected AnalyzerFailure, got {:?}", other),
        }
    }
}
