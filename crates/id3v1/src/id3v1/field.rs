//! ID3v1 record layout and text field decoding

use smartstring::{LazyCompact, SmartString};

use crate::common::tagtype::TagType;

/// Decode `length` bytes of `window` starting at `start` as a text field.
///
/// Bytes are Latin-1, one char per byte. The field ends at its first
/// NUL byte; everything after it is padding. What's left is trimmed
/// (ASCII whitespace and NBSP), and an empty field is `None`.
///
/// Returns `None` if the range isn't inside `window`.
pub fn decode_field(
	window: &[u8],
	start: usize,
	length: usize,
) -> Option<SmartString<LazyCompact>> {
	let bytes = window.get(start..start.checked_add(length)?)?;

	// NUL truncation must happen before trimming,
	// so that "\0\0  " is still empty.
	let bytes = match bytes.iter().position(|x| *x == 0) {
		Some(i) => &bytes[..i],
		None => bytes,
	};

	let text: String = bytes.iter().map(|x| char::from(*x)).collect();
	let text = text.trim_matches(is_padding);

	if text.is_empty() {
		return None;
	}
	return Some(text.into());
}

/// Is `c` whitespace we trim from text fields?
///
/// This is ASCII whitespace (including vertical tab) and NBSP.
/// NEL (0x85) is kept, it's text in Latin-1.
fn is_padding(c: char) -> bool {
	matches!(c, '\t'..='\r' | ' ' | '\u{a0}')
}

/// A field of an ID3v1 record.
///
/// Fields are listed in the order they are emitted
/// (which is not the order they're stored in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id3v1Field {
	Title,
	Artist,
	Album,
	Comment,
	Track,
	Year,
	Genre,
}

impl Id3v1Field {
	/// Every field, in emission order
	pub const ALL: [Self; 7] = [
		Self::Title,
		Self::Artist,
		Self::Album,
		Self::Comment,
		Self::Track,
		Self::Year,
		Self::Genre,
	];

	/// This field's (offset, length) inside a 128-byte record
	pub const fn range(&self) -> (usize, usize) {
		match self {
			Self::Title => (3, 30),
			Self::Artist => (33, 30),
			Self::Album => (63, 30),
			Self::Year => (93, 4),
			Self::Comment => (97, 28),
			Self::Track => (126, 1),
			Self::Genre => (127, 1),
		}
	}

	/// Is this field stored as text?
	/// Track and genre are single bytes.
	pub const fn is_text(&self) -> bool {
		!matches!(self, Self::Track | Self::Genre)
	}

	/// The key this field is reported under in the ID3v1 namespace
	pub const fn key(&self) -> &'static str {
		match self {
			Self::Title => "title",
			Self::Artist => "artist",
			Self::Album => "album",
			Self::Comment => "comment",
			Self::Track => "track",
			Self::Year => "year",
			Self::Genre => "genre",
		}
	}

	/// The universal tag type this field maps to.
	/// Sinks get [`Self::key`], this is for whoever merges formats.
	pub fn tag_type(&self) -> TagType {
		match self {
			Self::Title => TagType::TrackTitle,
			Self::Artist => TagType::TrackArtist,
			Self::Album => TagType::Album,
			Self::Comment => TagType::Comment,
			Self::Track => TagType::TrackNumber,
			Self::Year => TagType::Year,
			Self::Genre => TagType::Genre,
		}
	}

	/// Decode this field from a record as text.
	/// Always `None` for fields that aren't text.
	pub fn decode_text(&self, window: &[u8]) -> Option<SmartString<LazyCompact>> {
		if !self.is_text() {
			return None;
		}
		let (start, length) = self.range();
		return decode_field(window, start, length);
	}
}
