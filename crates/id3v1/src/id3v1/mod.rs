//! Parse ID3v1 tags.
//!
//! An ID3v1 tag is a fixed 128-byte record at the very end of a file:
//!
//! | Field     | Offset | Length |
//! |-----------|--------|--------|
//! | `TAG`     | 0      | 3      |
//! | title     | 3      | 30     |
//! | artist    | 33     | 30     |
//! | album     | 63     | 30     |
//! | year      | 93     | 4      |
//! | comment   | 97     | 28     |
//! | (zero)    | 125    | 1      |
//! | track     | 126    | 1      |
//! | genre     | 127    | 1      |
//!
//! The zero byte and track number are the ID3v1.1 extension.
//! In plain ID3v1 records the comment is 30 bytes long.

pub mod config;
pub mod errors;
pub mod field;
pub mod genre;
pub mod probe;
pub mod reader;
pub mod record;

pub use config::{Id3v1Config, UnknownGenre};
pub use errors::Id3v1Error;
pub use probe::has_id3v1;
pub use reader::{Id3v1Reader, NeighborTag, NeighborTagParser};
pub use record::Id3v1Record;

/// The length of an ID3v1 record, in bytes
pub const ID3V1_LEN: usize = 128;

/// [`ID3V1_LEN`], for arithmetic with source positions
pub const ID3V1_LEN_U64: u64 = 128;

/// Every ID3v1 record starts with these bytes
pub const ID3V1_SIGNATURE: &[u8; 3] = b"TAG";

#[cfg(test)]
pub(crate) mod tests {
	use async_trait::async_trait;
	use std::io::{Error, ErrorKind};

	use super::{field::Id3v1Field, ID3V1_LEN, ID3V1_SIGNATURE};
	use crate::common::source::ByteSource;

	/// Builds raw ID3v1 records.
	/// Text is truncated to its field's width.
	pub struct RecordBuilder {
		window: [u8; ID3V1_LEN],
	}

	impl RecordBuilder {
		pub fn new() -> Self {
			let mut window = [0u8; ID3V1_LEN];
			window[..3].copy_from_slice(ID3V1_SIGNATURE);
			// No genre
			window[127] = super::genre::NO_GENRE;
			Self { window }
		}

		fn text(mut self, field: Id3v1Field, text: &str) -> Self {
			let (start, length) = field.range();
			let bytes = text.as_bytes();
			let n = bytes.len().min(length);
			self.window[start..start + length].fill(0);
			self.window[start..start + n].copy_from_slice(&bytes[..n]);
			self
		}

		pub fn title(self, text: &str) -> Self {
			self.text(Id3v1Field::Title, text)
		}

		pub fn artist(self, text: &str) -> Self {
			self.text(Id3v1Field::Artist, text)
		}

		pub fn album(self, text: &str) -> Self {
			self.text(Id3v1Field::Album, text)
		}

		pub fn year(self, text: &str) -> Self {
			self.text(Id3v1Field::Year, text)
		}

		pub fn comment(self, text: &str) -> Self {
			self.text(Id3v1Field::Comment, text)
		}

		pub fn track(mut self, track: u8) -> Self {
			self.window[125] = 0;
			self.window[126] = track;
			self
		}

		pub fn genre(mut self, code: u8) -> Self {
			self.window[127] = code;
			self
		}

		pub fn build(self) -> [u8; ID3V1_LEN] {
			self.window
		}
	}

	/// Make a fake file of `total_len` bytes that ends with `record`
	pub fn with_audio(total_len: usize, record: &[u8]) -> Vec<u8> {
		let mut data: Vec<u8> = (0..total_len - record.len())
			.map(|i| u8::try_from(i % 251).unwrap())
			.collect();
		data.extend_from_slice(record);
		data
	}

	/// Counts reads made through an inner source
	pub struct CountingSource<S> {
		inner: S,
		pub reads: usize,
	}

	impl<S: ByteSource> CountingSource<S> {
		pub fn new(inner: S) -> Self {
			Self { inner, reads: 0 }
		}
	}

	#[async_trait]
	impl<S: ByteSource> ByteSource for CountingSource<S> {
		fn total_size(&self) -> Option<u64> {
			self.inner.total_size()
		}

		fn position(&self) -> u64 {
			self.inner.position()
		}

		fn set_position(&mut self, position: u64) {
			self.inner.set_position(position)
		}

		async fn read_bytes(&mut self, buf: &mut [u8], at: Option<u64>) -> Result<(), Error> {
			self.reads += 1;
			self.inner.read_bytes(buf, at).await
		}
	}

	/// A source of known size where every read fails,
	/// after moving the read head somewhere strange.
	pub struct FailingSource {
		size: u64,
		position: u64,
		pub reads: usize,
	}

	impl FailingSource {
		pub fn new(size: u64) -> Self {
			Self {
				size,
				position: 0,
				reads: 0,
			}
		}
	}

	#[async_trait]
	impl ByteSource for FailingSource {
		fn total_size(&self) -> Option<u64> {
			Some(self.size)
		}

		fn position(&self) -> u64 {
			self.position
		}

		fn set_position(&mut self, position: u64) {
			self.position = position;
		}

		async fn read_bytes(&mut self, _buf: &mut [u8], at: Option<u64>) -> Result<(), Error> {
			self.reads += 1;
			self.position = at.unwrap_or(self.position) + 1;
			return Err(Error::new(ErrorKind::ConnectionReset, "source went away"));
		}
	}
}
