pub mod common;
pub mod id3v1;
pub mod batch;

pub use common::error::{TagError, Result};
pub use id3v1::codec::{decode, decode_lenient, EncodedTag};
pub use id3v1::options::SpliceOptions;
pub use id3v1::record::TagRecord;
pub use id3v1::{fix_padding, read_tag, remove_tag, write_tag, Id3v1Writer};


#[cfg(feature = "python")]
mod python_bindings {
use super::*;
use pyo3::prelude::*;
use pyo3::types::PyDict;

/// Write an ID3v1 tag. Track and genre accept loose text ("5/12", "Rock").
#[pyfunction]
#[pyo3(signature = (filename, title=None, artist=None, album=None, year=None, comment=None, track=None, genre=None))]
#[allow(clippy::too_many_arguments)]
fn write_tag(
    filename: &str,
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    year: Option<String>,
    comment: Option<String>,
    track: Option<String>,
    genre: Option<String>,
) -> PyResult<Vec<String>> {
    let fields = [
        ("title", title),
        ("artist", artist),
        ("album", album),
        ("year", year),
        ("comment", comment),
        ("track", track),
        ("genre", genre),
    ];
    let record = TagRecord::from_fields(
        fields.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))),
    );

    let mut writer = Id3v1Writer::new(filename);
    writer.write(&record)?;
    Ok(writer.warnings().to_vec())
}

/// Remove the ID3v1 tag. Returns True if a tag was removed.
#[pyfunction]
fn remove_tag(filename: &str) -> PyResult<bool> {
    Ok(Id3v1Writer::new(filename).remove()?)
}

#[pyfunction]
fn fix_padding(filename: &str) -> PyResult<()> {
    Ok(id3v1::fix_padding(filename)?)
}

/// Read the ID3v1 tag as a dict, or None.
#[pyfunction]
fn read_tag<'py>(py: Python<'py>, filename: &str) -> PyResult<Option<Bound<'py, PyDict>>> {
    let Some(record) = id3v1::read_tag(filename)? else {
        return Ok(None);
    };
    let dict = PyDict::new(py);
    dict.set_item("title", &record.title)?;
    dict.set_item("artist", &record.artist)?;
    dict.set_item("album", &record.album)?;
    dict.set_item("year", &record.year)?;
    dict.set_item("comment", &record.comment)?;
    dict.set_item("track", record.track.map(|t| t.get()))?;
    dict.set_item("genre", record.genre)?;
    Ok(Some(dict))
}

// ---- Module registration ----

#[pymodule]
fn id3v1_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(write_tag, m)?)?;
    m.add_function(wrap_pyfunction!(remove_tag, m)?)?;
    m.add_function(wrap_pyfunction!(fix_padding, m)?)?;
    m.add_function(wrap_pyfunction!(read_tag, m)?)?;

    m.add("Id3v1Error", m.py().get_type::<common::error::Id3v1Error>())?;
    m.add("NotWritableError", m.py().get_type::<common::error::NotWritableError>())?;
    m.add("FileTooLargeError", m.py().get_type::<common::error::FileTooLargeError>())?;
    m.add("NoExistingTagError", m.py().get_type::<common::error::NoExistingTagError>())?;
    m.add("AnalyzerError", m.py().get_type::<common::error::AnalyzerError>())?;

    Ok(())
}
} // mod python_bindings
