use std::collections::HashMap;
use std::num::NonZeroU8;

use crate::id3v1::genres::parse_genre_id;
use crate::id3v1::layout::{self, CommentSlot, Field};

/// The logical contents of an ID3v1 tag, before encoding.
///
/// Text fields may be any length; they are cut to their slot width when
/// encoded. Absent genre encodes as the unknown sentinel, absent track
/// selects the full 30-byte comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRecord {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub comment: String,
    pub genre: Option<u8>,
    pub track: Option<NonZeroU8>,
}

/// Keys checked for the track number, in priority order.
const TRACK_KEYS: [&str; 3] = ["track", "track_number", "tracknumber"];

impl TagRecord {
    /// Build a record from loosely-typed text fields (as produced by an
    /// analyzer or a caller-supplied map).
    ///
    /// Keys are matched case-insensitively. Unparsable track or genre
    /// values are dropped rather than reported.
    pub fn from_fields<K, V, I>(fields: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let map: HashMap<String, String> = fields
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.as_ref().to_string()))
            .collect();
        let get = |key: &str| map.get(key).cloned().unwrap_or_default();

        let track = TRACK_KEYS
            .iter()
            .find_map(|k| map.get(*k).filter(|v| !v.trim().is_empty()))
            .and_then(|v| parse_track(v));

        let genre = match map.get("genreid").filter(|v| !v.trim().is_empty()) {
            Some(id) => id.trim().parse::<u8>().ok(),
            None => map.get("genre").and_then(|g| parse_genre_id(g)),
        };

        TagRecord {
            title: get("title"),
            artist: get("artist"),
            album: get("album"),
            year: get("year"),
            comment: get("comment"),
            genre,
            track,
        }
    }

    pub fn comment_slot(&self) -> CommentSlot {
        CommentSlot::for_track(self.track)
    }

    /// Non-fatal notices about data that will not survive encoding intact.
    pub fn truncation_warnings(&self) -> Vec<String> {
        let comment = self.comment_slot().comment_field();
        let checks: [(&str, &str, Field); 5] = [
            ("title", self.title.as_str(), layout::TITLE),
            ("artist", self.artist.as_str(), layout::ARTIST),
            ("album", self.album.as_str(), layout::ALBUM),
            ("year", self.year.as_str(), layout::YEAR),
            ("comment", self.comment.as_str(), comment),
        ];

        let mut warnings = Vec::new();
        for (name, value, field) in checks {
            let chars = value.chars().count();
            if chars > field.len {
                warnings.push(format!(
                    "{} truncated from {} to {} characters",
                    name, chars, field.len
                ));
            }
            if value.chars().any(|c| c as u32 > 0xFF) {
                warnings.push(format!(
                    "{} contains characters outside ISO-8859-1, replaced with '?'",
                    name
                ));
            }
        }
        warnings
    }
}

/// Parse a track number written as "5", "05" or "5/12".
/// Zero, negative and out-of-range values yield `None`.
pub fn parse_track(text: &str) -> Option<NonZeroU8> {
    let n = text.split('/').next()?.trim().parse::<u8>().ok()?;
    NonZeroU8::new(n)
}
