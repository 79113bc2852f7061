#[cfg(feature = "python")]
use pyo3::create_exception;
#[cfg(feature = "python")]
use pyo3::exceptions::PyException;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File is not writeable: {path} ({reason})")]
    NotWritable { path: String, reason: String },

    #[error("Unable to modify {path} because filesize ({size}) is not below the {limit} byte limit")]
    FileTooLarge { path: String, size: u64, limit: u64 },

    #[error("No ID3v1 tag found in {0}")]
    NoExistingTag(String),

    #[error("Analyzer failed: {0}")]
    AnalyzerFailure(String),
}

impl TagError {
    pub(crate) fn not_writable(path: &str, err: &std::io::Error) -> Self {
        TagError::NotWritable {
            path: path.to_string(),
            reason: err.to_string(),
        }
    }

    /// Wrap an error raised inside an analyzer, keeping existing
    /// `AnalyzerFailure`s as they are.
    pub(crate) fn into_analyzer_failure(self) -> Self {
        match self {
            TagError::AnalyzerFailure(_) => self,
            other => TagError::AnalyzerFailure(other.to_string()),
        }
    }
}

// Python exception types, one per error kind
#[cfg(feature = "python")]
create_exception!(id3v1_rs, Id3v1Error, PyException);
#[cfg(feature = "python")]
create_exception!(id3v1_rs, NotWritableError, Id3v1Error);
#[cfg(feature = "python")]
create_exception!(id3v1_rs, FileTooLargeError, Id3v1Error);
#[cfg(feature = "python")]
create_exception!(id3v1_rs, NoExistingTagError, Id3v1Error);
#[cfg(feature = "python")]
create_exception!(id3v1_rs, AnalyzerError, Id3v1Error);

#[cfg(feature = "python")]
impl From<TagError> for pyo3::PyErr {
    fn from(err: TagError) -> pyo3::PyErr {
        let msg = err.to_string();
        match err {
            TagError::Io(_) => pyo3::exceptions::PyIOError::new_err(msg),
            TagError::NotWritable { .. } => NotWritableError::new_err(msg),
            TagError::FileTooLarge { .. } => FileTooLargeError::new_err(msg),
            TagError::NoExistingTag(_) => NoExistingTagError::new_err(msg),
            TagError::AnalyzerFailure(_) => AnalyzerError::new_err(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, TagError>;
