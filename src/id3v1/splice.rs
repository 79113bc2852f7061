//! Locating, writing and removing the trailer in a file on disk.
//!
//! Every operation opens the file, does its work and lets the handle drop
//! before returning, on success and on error alike. Nothing before the last
//! 128 bytes of the file is ever read back or rewritten.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};

use log::{debug, trace, warn};

use crate::common::error::Result;
use crate::common::util::{open_ro, open_rw, read_at};
use crate::id3v1::analyzer::{TagAnalyzer, TrailerAnalyzer};
use crate::id3v1::codec::{self, EncodedTag};
use crate::id3v1::layout::{MARKER, TAG_SIZE};
use crate::id3v1::options::SpliceOptions;
use crate::id3v1::probe::probe_size_with_fallback;
use crate::id3v1::record::TagRecord;

/// Seekable storage the trailer is spliced into.
pub trait SpliceTarget: Read + Write + Seek {
    fn truncate_to(&mut self, len: u64) -> io::Result<()>;
}

impl SpliceTarget for File {
    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

/// Offset of an existing trailer in a target of `size` bytes, if one is there.
/// Targets shorter than a trailer never have one.
pub fn find_trailer<T: Read + Seek>(target: &mut T, size: u64) -> Result<Option<u64>> {
    let Some(offset) = size.checked_sub(TAG_SIZE as u64) else {
        return Ok(None);
    };
    let mut marker = [0u8; 3];
    target.seek(SeekFrom::Start(offset))?;
    target.read_exact(&mut marker)?;
    Ok((&marker == MARKER).then_some(offset))
}

/// Write `tag` at `offset` in a target of `size` bytes.
///
/// If the write fails, the tag region is put back the way it was: an append
/// is truncated away, an overwrite gets the previous 128 bytes restored.
/// The write error is returned either way.
pub fn put_block<T: SpliceTarget>(target: &mut T, offset: u64, size: u64, tag: &EncodedTag) -> Result<()> {
    let previous = if offset < size {
        let mut buf = [0u8; TAG_SIZE];
        target.seek(SeekFrom::Start(offset))?;
        target.read_exact(&mut buf)?;
        Some(buf)
    } else {
        None
    };

    target.seek(SeekFrom::Start(offset))?;
    let written = target.write_all(tag.as_bytes()).and_then(|_| target.flush());
    if let Err(e) = written {
        let restored = match previous {
            Some(buf) => target
                .seek(SeekFrom::Start(offset))
                .and_then(|_| target.write_all(&buf))
                .and_then(|_| target.flush()),
            None => target.truncate_to(size),
        };
        match restored {
            Ok(()) => debug!("rolled back failed trailer write at {}", offset),
            Err(re) => warn!("could not roll back trailer write at {}: {}", offset, re),
        }
        return Err(e.into());
    }
    Ok(())
}

/// Write `record` as the file's trailer.
/// An existing trailer is overwritten in place; otherwise the tag is
/// appended. Exactly 128 bytes are written.
pub fn write_trailer(path: &str, record: &TagRecord, options: &SpliceOptions) -> Result<()> {
    write_trailer_with(path, record, &TrailerAnalyzer, options)
}

/// [`write_trailer`] with `analyzer` as the size fallback.
pub fn write_trailer_with(
    path: &str,
    record: &TagRecord,
    analyzer: &dyn TagAnalyzer,
    options: &SpliceOptions,
) -> Result<()> {
    let mut file = open_rw(path)?;
    let size = probe_size_with_fallback(&file, path, analyzer, options)?;

    let offset = match find_trailer(&mut file, size)? {
        Some(offset) => {
            debug!("{}: overwriting ID3v1 tag at {}", path, offset);
            offset
        }
        None => {
            debug!("{}: appending ID3v1 tag at {}", path, size);
            size
        }
    };

    let tag = EncodedTag::encode(record);
    put_block(&mut file, offset, size, &tag)?;
    if options.sync {
        file.sync_all()?;
    }
    trace!("{}: wrote {} bytes", path, TAG_SIZE);
    Ok(())
}

/// Strip the trailer from the file.
/// Returns `false` when there was nothing to remove.
pub fn remove_trailer(path: &str, options: &SpliceOptions) -> Result<bool> {
    remove_trailer_with(path, &TrailerAnalyzer, options)
}

/// [`remove_trailer`] with `analyzer` as the size fallback.
pub fn remove_trailer_with(path: &str, analyzer: &dyn TagAnalyzer, options: &SpliceOptions) -> Result<bool> {
    let mut file = open_rw(path)?;
    let size = probe_size_with_fallback(&file, path, analyzer, options)?;

    match find_trailer(&mut file, size)? {
        Some(offset) => {
            file.set_len(offset)?;
            if options.sync {
                file.sync_all()?;
            }
            debug!("{}: removed ID3v1 tag, truncated to {}", path, offset);
            Ok(true)
        }
        None => {
            debug!("{}: no ID3v1 tag to remove", path);
            Ok(false)
        }
    }
}

/// Read and strictly decode the file's trailer, if present.
pub fn read_trailer(path: &str) -> Result<Option<TagRecord>> {
    let mut file = open_ro(path)?;
    let size = file.metadata()?.len();
    match find_trailer(&mut file, size)? {
        Some(offset) => {
            let mut buf = [0u8; TAG_SIZE];
            read_at(&mut file, offset, &mut buf)?;
            Ok(codec::decode(&buf))
        }
        None => Ok(None),
    }
}
