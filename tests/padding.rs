use id3v1_rs::id3v1::analyzer::{Analysis, FieldMap, TagAnalyzer, TrailerAnalyzer};
use id3v1_rs::id3v1::padding;
use id3v1_rs::{fix_padding, read_tag, Id3v1Writer, SpliceOptions, TagError};
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;

/// A trailer padded with spaces the way some old taggers wrote it.
fn space_padded_tag() -> Vec<u8> {
    fn field(text: &str, width: usize) -> Vec<u8> {
        let mut out = text.as_bytes().to_vec();
        out.resize(width, b' ');
        out
    }

    let mut tag = b"TAG".to_vec();
    tag.extend(field("Song", 30));
    tag.extend(field("Band", 30));
    tag.extend(field("Album", 30));
    tag.extend(field("1999", 4));
    tag.extend(field("note", 28));
    tag.push(0);
    tag.push(5);
    tag.push(17);
    assert_eq!(tag.len(), 128);
    tag
}

fn file_with(bytes: &[u8]) -> (NamedTempFile, String) {
    let tmp = NamedTempFile::new().unwrap();
    fs::write(tmp.path(), bytes).unwrap();
    let path = tmp.path().to_str().unwrap().to_string();
    (tmp, path)
}

#[test]
fn test_fix_padding_replaces_spaces_with_nul() {
    let mut data = vec![0x55u8; 2048];
    data.extend(space_padded_tag());
    let (_tmp, path) = file_with(&data);

    fix_padding(&path).unwrap();

    let after = fs::read(&path).unwrap();
    assert_eq!(after.len(), data.len());
    assert_eq!(&after[..2048], &data[..2048]);

    let tag = &after[2048..];
    assert_eq!(&tag[3..7], b"Song");
    assert!(tag[7..33].iter().all(|&b| b == 0));
    assert!(tag[101..125].iter().all(|&b| b == 0));
    assert_eq!(tag[126], 5);
    assert_eq!(tag[127], 17);

    let record = read_tag(&path).unwrap().unwrap();
    assert_eq!(record.title, "Song");
    assert_eq!(record.comment, "note");
}

#[test]
fn test_fix_padding_without_tag_writes_nothing() {
    let data = vec![0x55u8; 600];
    let (_tmp, path) = file_with(&data);

    let err = fix_padding(&path).unwrap_err();
    assert!(matches!(err, TagError::NoExistingTag(_)));
    assert_eq!(fs::read(&path).unwrap(), data);
}

#[test]
fn test_fix_padding_missing_file_is_analyzer_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gone.mp3");
    let err = fix_padding(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, TagError::AnalyzerFailure(_)));
}

#[test]
fn test_trailer_analyzer_reports_size_and_fields() {
    let mut data = vec![1u8; 10];
    data.extend(space_padded_tag());
    let (tmp, _path) = file_with(&data);

    let analysis = TrailerAnalyzer.analyze(tmp.path()).unwrap();
    assert_eq!(analysis.file_size, 138);
    let fields = analysis.legacy_tag.unwrap();
    assert_eq!(fields["title"], vec!["Song".to_string()]);
    assert_eq!(fields["track_number"], vec!["5".to_string()]);
    assert_eq!(fields["genre"], vec!["Rock".to_string()]);
}

/// Analyzer returning canned multi-valued fields.
struct MultiValued;

impl TagAnalyzer for MultiValued {
    fn analyze(&self, path: &Path) -> id3v1_rs::Result<Analysis> {
        let mut fields = FieldMap::new();
        fields.insert("artist".into(), vec!["Alice".into(), "Bob".into()]);
        fields.insert("title".into(), vec!["Duet".into()]);
        fields.insert("genreid".into(), vec!["8".into()]);
        Ok(Analysis {
            file_size: fs::metadata(path)?.len(),
            legacy_tag: Some(fields),
        })
    }
}

struct Broken;

impl TagAnalyzer for Broken {
    fn analyze(&self, _path: &Path) -> id3v1_rs::Result<Analysis> {
        Err(TagError::AnalyzerFailure("corrupt stream".into()))
    }
}

#[test]
fn test_custom_analyzer_values_are_comma_joined() {
    let (_tmp, path) = file_with(&[0u8; 64]);

    padding::fix_padding(&path, &MultiValued, &SpliceOptions::default()).unwrap();

    let record = read_tag(&path).unwrap().unwrap();
    assert_eq!(record.artist, "Alice,Bob");
    assert_eq!(record.title, "Duet");
    assert_eq!(record.genre, Some(8));
    assert_eq!(fs::metadata(&path).unwrap().len(), 64 + 128);
}

#[test]
fn test_writer_reports_analyzer_failure() {
    let (_tmp, path) = file_with(&[0u8; 64]);
    let mut writer = Id3v1Writer::new(path.clone()).analyzer(Broken);

    let err = writer.fix_padding().unwrap_err();
    match err {
        TagError::AnalyzerFailure(msg) => assert_eq!(msg, "corrupt stream"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(writer.errors(), ["Analyzer failed: corrupt stream".to_string()]);
    assert_eq!(fs::metadata(&path).unwrap().len(), 64);
}

#[test]
fn test_writer_with_custom_analyzer_writes_and_removes() {
    let (_tmp, path) = file_with(&[0u8; 64]);
    let mut writer = Id3v1Writer::new(path.clone()).analyzer(MultiValued);

    writer.write(&id3v1_rs::TagRecord::default()).unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), 64 + 128);
    assert!(writer.remove().unwrap());
    assert_eq!(fs::metadata(&path).unwrap().len(), 64);
    assert!(writer.errors().is_empty());
}
