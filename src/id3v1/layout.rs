//! Byte layout of the 128-byte ID3v1 trailer.
//!
//! ```text
//! 0    3     33     63     93   97          125 126 127
//! TAG | title | artist | album | year | comment | 0 | trk | genre
//! ```
//!
//! The last two comment bytes double as the ID3v1.1 track marker and track
//! number. Which reading applies is captured by [`CommentSlot`].

use std::num::NonZeroU8;
use std::ops::Range;

/// Total size of the trailer in bytes.
pub const TAG_SIZE: usize = 128;

/// Literal marker at the start of the trailer.
pub const MARKER: &[u8; 3] = b"TAG";

/// Genre byte written when no genre is known.
pub const GENRE_UNKNOWN: u8 = 255;

/// A fixed-width slot inside the trailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub offset: usize,
    pub len: usize,
}

impl Field {
    pub const fn new(offset: usize, len: usize) -> Self {
        Field { offset, len }
    }

    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

pub const MARKER_FIELD: Field = Field::new(0, 3);
pub const TITLE: Field = Field::new(3, 30);
pub const ARTIST: Field = Field::new(33, 30);
pub const ALBUM: Field = Field::new(63, 30);
pub const YEAR: Field = Field::new(93, 4);
/// Full-width comment (ID3v1.0).
pub const COMMENT: Field = Field::new(97, 30);
/// Shortened comment when the track occupies the last two bytes (ID3v1.1).
pub const COMMENT_WITH_TRACK: Field = Field::new(97, 28);
pub const TRACK_MARKER: usize = 125;
pub const TRACK: usize = 126;
pub const GENRE: usize = 127;

/// How the comment area is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSlot {
    /// 28-byte comment, a zero marker byte, then the track number.
    WithTrack(NonZeroU8),
    /// 30-byte comment, no track.
    NoTrack,
}

impl CommentSlot {
    pub fn for_track(track: Option<NonZeroU8>) -> Self {
        match track {
            Some(n) => CommentSlot::WithTrack(n),
            None => CommentSlot::NoTrack,
        }
    }

    /// Detect the slot from raw trailer bytes.
    /// A zero at byte 125 followed by a non-zero byte at 126 means ID3v1.1.
    pub fn detect(tag: &[u8; TAG_SIZE]) -> Self {
        match (tag[TRACK_MARKER], NonZeroU8::new(tag[TRACK])) {
            (0, Some(n)) => CommentSlot::WithTrack(n),
            _ => CommentSlot::NoTrack,
        }
    }

    pub fn comment_field(self) -> Field {
        match self {
            CommentSlot::WithTrack(_) => COMMENT_WITH_TRACK,
            CommentSlot::NoTrack => COMMENT,
        }
    }

    pub fn track(self) -> Option<NonZeroU8> {
        match self {
            CommentSlot::WithTrack(n) => Some(n),
            CommentSlot::NoTrack => None,
        }
    }
}
