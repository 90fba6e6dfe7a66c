//! Decode a 128-byte ID3v1 record

use smartstring::{LazyCompact, SmartString};

use super::{
	field::{decode_field, Id3v1Field},
	genre, ID3V1_LEN, ID3V1_SIGNATURE,
};
use crate::common::sink::TagValue;

/// A decoded ID3v1 (or ID3v1.1) record.
///
/// Text fields are `None` if they were empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id3v1Record {
	pub title: Option<SmartString<LazyCompact>>,
	pub artist: Option<SmartString<LazyCompact>>,
	pub album: Option<SmartString<LazyCompact>>,
	pub year: Option<SmartString<LazyCompact>>,
	pub comment: Option<SmartString<LazyCompact>>,

	/// Byte 125, the last byte of the comment field.
	/// Zero in ID3v1.1 records.
	pub separator: u8,

	/// Byte 126. This is always read as a track number,
	/// even in plain ID3v1 records where it is comment text.
	pub track_number: u8,

	/// Byte 127, an index into [`genre::GENRES`]
	pub genre_code: u8,
}

impl Id3v1Record {
	/// Try to decode a record from exactly 128 bytes.
	///
	/// Returns `None` if `window` has the wrong length,
	/// or if it doesn't start with `TAG`.
	pub fn decode(window: &[u8]) -> Option<Self> {
		if window.len() != ID3V1_LEN {
			return None;
		}

		let signature = decode_field(window, 0, ID3V1_SIGNATURE.len());
		if signature.as_deref().map(str::as_bytes) != Some(&ID3V1_SIGNATURE[..]) {
			return None;
		}

		return Some(Self {
			title: Id3v1Field::Title.decode_text(window),
			artist: Id3v1Field::Artist.decode_text(window),
			album: Id3v1Field::Album.decode_text(window),
			year: Id3v1Field::Year.decode_text(window),
			comment: Id3v1Field::Comment.decode_text(window),
			separator: window[125],
			track_number: window[Id3v1Field::Track.range().0],
			genre_code: window[Id3v1Field::Genre.range().0],
		});
	}

	/// Does this record follow the ID3v1.1 convention?
	/// (a zero byte at 125 followed by a track number)
	///
	/// This is informational, we don't use it while decoding.
	pub fn is_v11(&self) -> bool {
		self.separator == 0 && self.track_number != 0
	}

	/// The name of this record's genre, if its code is in the table.
	pub fn genre(&self) -> Option<&'static str> {
		genre::lookup(self.genre_code)
	}

	/// Get the value of one field.
	///
	/// Empty text fields, track zero, and unknown
	/// genre codes have no value.
	pub fn get(&self, field: Id3v1Field) -> Option<TagValue> {
		let text = match field {
			Id3v1Field::Title => &self.title,
			Id3v1Field::Artist => &self.artist,
			Id3v1Field::Album => &self.album,
			Id3v1Field::Year => &self.year,
			Id3v1Field::Comment => &self.comment,

			Id3v1Field::Track => {
				return (self.track_number != 0).then(|| u32::from(self.track_number).into());
			}
			Id3v1Field::Genre => return self.genre().map(TagValue::from),
		};

		return text.as_deref().map(TagValue::from);
	}

	/// Every field that has a value, in emission order.
	pub fn tags(&self) -> impl Iterator<Item = (Id3v1Field, TagValue)> + '_ {
		Id3v1Field::ALL
			.into_iter()
			.filter_map(|f| Some((f, self.get(f)?)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::id3v1::tests::RecordBuilder;
	use itertools::Itertools;

	#[test]
	fn decode_full_record() {
		let window = RecordBuilder::new()
			.title("Title X")
			.artist("Artist Y")
			.year("2001")
			.track(5)
			.genre(17)
			.build();

		let r = Id3v1Record::decode(&window).unwrap();
		assert_eq!(r.title.as_deref(), Some("Title X"));
		assert_eq!(r.artist.as_deref(), Some("Artist Y"));
		assert_eq!(r.album, None);
		assert_eq!(r.year.as_deref(), Some("2001"));
		assert_eq!(r.comment, None);
		assert_eq!(r.track_number, 5);
		assert_eq!(r.genre_code, 17);
		assert_eq!(r.genre(), Some("Rock"));
		assert!(r.is_v11());
	}

	#[test]
	fn bad_signature() {
		let good = RecordBuilder::new().title("Something").build();
		assert!(Id3v1Record::decode(&good).is_some());

		for sig in [b"tag", b"TAg", b"TAH", b"ID3", b"\0\0\0", b"TA\0", b" TA"] {
			let mut window = good;
			window[..3].copy_from_slice(sig);
			assert_eq!(Id3v1Record::decode(&window), None);
		}
	}

	#[test]
	fn every_other_first_byte() {
		let good = RecordBuilder::new().build();
		for b in (0..=255u8).filter(|b| *b != b'T') {
			let mut window = good;
			window[0] = b;
			assert_eq!(Id3v1Record::decode(&window), None);
		}
	}

	#[test]
	fn wrong_length() {
		let window = RecordBuilder::new().build();
		assert_eq!(Id3v1Record::decode(&window[..127]), None);

		let mut long = window.to_vec();
		long.push(0);
		assert_eq!(Id3v1Record::decode(&long), None);
	}

	#[test]
	fn empty_record_is_not_absent() {
		// A valid record with nothing in it is still a record
		let r = Id3v1Record::decode(&RecordBuilder::new().genre(255).build()).unwrap();
		assert_eq!(r.title, None);
		assert_eq!(r.tags().count(), 0);
	}

	#[test]
	fn plain_v1_comment_runs_into_track() {
		// A v1.0 comment fills all 30 bytes, so byte 126 is text.
		// We still read it as a track number.
		let mut window = RecordBuilder::new().build();
		window[97..127].copy_from_slice(b"A comment that is thirty bytes");

		let r = Id3v1Record::decode(&window).unwrap();
		assert_eq!(r.comment.as_deref(), Some("A comment that is thirty byt"));
		assert_eq!(r.separator, b'e');
		assert_eq!(r.track_number, b's');
		assert!(!r.is_v11());
		assert_eq!(r.get(Id3v1Field::Track), Some(TagValue::Number(115)));
	}

	#[test]
	fn tags_in_order() {
		let window = RecordBuilder::new()
			.title("T")
			.artist("A")
			.album("Al")
			.comment("C")
			.track(9)
			.year("1999")
			.genre(0)
			.build();

		let r = Id3v1Record::decode(&window).unwrap();
		let keys = r.tags().map(|(f, _)| f.key()).collect_vec();
		assert_eq!(
			keys,
			["title", "artist", "album", "comment", "track", "year", "genre"]
		);
		assert_eq!(r.get(Id3v1Field::Genre), Some(TagValue::from("Blues")));
	}

	#[test]
	fn zero_track_and_unknown_genre_have_no_value() {
		let r = Id3v1Record::decode(&RecordBuilder::new().track(0).genre(200).build()).unwrap();
		assert_eq!(r.get(Id3v1Field::Track), None);
		assert_eq!(r.get(Id3v1Field::Genre), None);
		assert_eq!(r.genre(), None);
	}
}
