use crate::id3v1::layout::{self, CommentSlot, Field, GENRE_UNKNOWN, MARKER, TAG_SIZE};
use crate::id3v1::record::TagRecord;

/// A fully encoded 128-byte ID3v1 trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedTag([u8; TAG_SIZE]);

impl EncodedTag {
    /// Encode a record. Text is written as ISO-8859-1, NUL-padded and cut
    /// to the slot width; encoding cannot fail.
    pub fn encode(record: &TagRecord) -> Self {
        let mut tag = [0u8; TAG_SIZE];
        tag[layout::MARKER_FIELD.range()].copy_from_slice(MARKER);

        write_v1_string(&mut tag, layout::TITLE, &record.title);
        write_v1_string(&mut tag, layout::ARTIST, &record.artist);
        write_v1_string(&mut tag, layout::ALBUM, &record.album);
        write_v1_string(&mut tag, layout::YEAR, &record.year);

        let slot = record.comment_slot();
        write_v1_string(&mut tag, slot.comment_field(), &record.comment);
        if let CommentSlot::WithTrack(track) = slot {
            tag[layout::TRACK_MARKER] = 0;
            tag[layout::TRACK] = track.get();
        }

        tag[layout::GENRE] = record.genre.unwrap_or(GENRE_UNKNOWN);
        EncodedTag(tag)
    }

    pub fn as_bytes(&self) -> &[u8; TAG_SIZE] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; TAG_SIZE] {
        self.0
    }
}

/// Check whether `data` ends with an ID3v1 trailer.
pub fn has_marker(data: &[u8]) -> bool {
    data.len() >= TAG_SIZE && data[data.len() - TAG_SIZE..].starts_with(MARKER)
}

/// Decode the trailer at the end of `data`.
/// Text fields end at their first NUL byte.
pub fn decode(data: &[u8]) -> Option<TagRecord> {
    decode_with(data, false)
}

/// Decode the trailer at the end of `data`, also dropping trailing spaces.
/// Some taggers pad with spaces instead of NULs; this reads them back as
/// the intended text.
pub fn decode_lenient(data: &[u8]) -> Option<TagRecord> {
    decode_with(data, true)
}

fn decode_with(data: &[u8], trim_spaces: bool) -> Option<TagRecord> {
    if !has_marker(data) {
        return None;
    }
    let tag: &[u8; TAG_SIZE] = data[data.len() - TAG_SIZE..].try_into().ok()?;

    let read = |field: Field| read_v1_string(&tag[field.range()], trim_spaces);
    let slot = CommentSlot::detect(tag);
    let genre = match tag[layout::GENRE] {
        GENRE_UNKNOWN => None,
        id => Some(id),
    };

    Some(TagRecord {
        title: read(layout::TITLE),
        artist: read(layout::ARTIST),
        album: read(layout::ALBUM),
        year: read(layout::YEAR),
        comment: read(slot.comment_field()),
        genre,
        track: slot.track(),
    })
}

/// Read a fixed-width ISO-8859-1 string, stopping at the first NUL.
fn read_v1_string(data: &[u8], trim_spaces: bool) -> String {
    let end = memchr::memchr(0, data).unwrap_or(data.len());
    let mut bytes = &data[..end];
    if trim_spaces {
        while let [rest @ .., b' '] = bytes {
            bytes = rest;
        }
    }
    bytes.iter().map(|&b| b as char).collect()
}

/// Write `text` into `field` as ISO-8859-1. The slot is assumed zeroed, so
/// the remainder stays NUL-padded.
fn write_v1_string(tag: &mut [u8; TAG_SIZE], field: Field, text: &str) {
    let dest = &mut tag[field.range()];
    let latin1 = text
        .chars()
        .map(|c| if c as u32 <= 0xFF { c as u8 } else { b'?' });
    for (slot, byte) in dest.iter_mut().zip(latin1) {
        *slot = byte;
    }
}
