use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom};
use crate::common::error::{TagError, Result};

/// Open a file for read/write access.
/// Anything that prevents opening (missing file, permissions, not a regular
/// file) is reported as `NotWritable`.
pub fn open_rw(path: &str) -> Result<File> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|e| TagError::not_writable(path, &e))?;

    let meta = file.metadata().map_err(|e| TagError::not_writable(path, &e))?;
    if !meta.is_file() {
        return Err(TagError::NotWritable {
            path: path.to_string(),
            reason: "not a regular file".into(),
        });
    }
    Ok(file)
}

/// Open a file for read-only access.
pub fn open_ro(path: &str) -> Result<File> {
    Ok(File::open(path)?)
}

/// Read exactly `buf.len()` bytes starting at `offset`.
pub fn read_at(fobj: &mut File, offset: u64, buf: &mut [u8]) -> Result<()> {
    fobj.seek(SeekFrom::Start(offset))?;
    fobj.read_exact(buf)?;
    Ok(())
}
