//! Extract ID3v1 tags from a byte source

use async_trait::async_trait;
use std::error::Error;
use tracing::{debug, trace, warn, Level};

use super::{
	config::{Id3v1Config, UnknownGenre},
	errors::Id3v1Error,
	field::Id3v1Field,
	genre,
	record::Id3v1Record,
	ID3V1_LEN, ID3V1_LEN_U64,
};
use crate::common::{
	sink::{TagFormat, TagSink},
	source::ByteSource,
};

/// A trailing tag that was found right in front of
/// where an ID3v1 record would be (usually APEv2).
///
/// This is found by whoever looked at the file before us.
#[derive(Debug, Clone)]
pub struct NeighborTag<F> {
	/// Where this tag starts in the source
	pub offset: u64,

	/// Whatever the neighbor's parser needs to read its tag.
	/// We never look inside.
	pub footer: F,
}

/// A parser for a trailing tag that sits in front of ID3v1.
#[async_trait]
pub trait NeighborTagParser: Send + Sync {
	/// What this parser gets from tag detection
	type Footer: Send + Sync;

	/// Read this tag's items into `sink`.
	/// `source` is positioned at the start of the tag.
	async fn parse_tags<S>(
		&self,
		source: &mut S,
		footer: &Self::Footer,
		sink: &mut dyn TagSink,
	) -> Result<(), Box<dyn Error + Send + Sync>>
	where
		S: ByteSource + ?Sized;
}

/// Reads ID3v1 tags.
///
/// A reader keeps no state between calls, so one reader
/// can be shared by any number of jobs.
#[derive(Debug, Clone, Default)]
pub struct Id3v1Reader {
	config: Id3v1Config,
}

impl Id3v1Reader {
	pub fn new(config: Id3v1Config) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &Id3v1Config {
		&self.config
	}

	/// Read the ID3v1 record at the end of `source`, if there is one,
	/// and send its fields to `sink`.
	///
	/// Returns the number of tags we emitted. Zero is not an error:
	/// the source may not have a record, may not know its size,
	/// or may already have been read past the start of the record.
	pub async fn read_tags<S>(
		&self,
		source: &mut S,
		sink: &mut dyn TagSink,
	) -> Result<usize, Id3v1Error>
	where
		S: ByteSource + ?Sized,
	{
		if source.total_size().is_none() {
			debug!(
				message = "Skipping id3v1",
				reason = "source size is unknown"
			);
			return Ok(0);
		}

		return self.read_record(source, sink).await;
	}

	/// Like [`Self::read_tags`], but first skip to `neighbor`
	/// and have `parser` read its tags into `sink`.
	///
	/// Both tags are read. The returned count only covers ID3v1 tags.
	pub async fn read_tags_after<S, P>(
		&self,
		source: &mut S,
		parser: &P,
		neighbor: NeighborTag<P::Footer>,
		sink: &mut dyn TagSink,
	) -> Result<usize, Id3v1Error>
	where
		S: ByteSource + ?Sized,
		P: NeighborTagParser,
	{
		if source.total_size().is_none() {
			debug!(
				message = "Skipping id3v1",
				reason = "source size is unknown"
			);
			return Ok(0);
		}

		let position = source.position();
		if neighbor.offset > position {
			source.skip(neighbor.offset - position).await?;
		}

		trace!(
			message = "Reading trailing tag before id3v1",
			offset = neighbor.offset
		);
		parser
			.parse_tags(&mut *source, &neighbor.footer, &mut *sink)
			.await
			.map_err(Id3v1Error::NeighborTag)?;

		return self.read_record(source, sink).await;
	}

	async fn read_record<S>(
		&self,
		source: &mut S,
		sink: &mut dyn TagSink,
	) -> Result<usize, Id3v1Error>
	where
		S: ByteSource + ?Sized,
	{
		let size = match source.total_size() {
			Some(x) => x,
			None => return Ok(0),
		};

		// Sources shorter than a record can't have one,
		// and if we're past its start, someone else already read it.
		let offset = match size.checked_sub(ID3V1_LEN_U64) {
			Some(x) if source.position() <= x => x,
			_ => {
				debug!(
					message = "Skipping id3v1",
					reason = "last 128 bytes were already consumed",
					position = source.position(),
					size
				);
				return Ok(0);
			}
		};

		let mut window = [0u8; ID3V1_LEN];
		source.read_bytes(&mut window, Some(offset)).await?;

		let record = match Id3v1Record::decode(&window) {
			Some(r) => r,
			None => {
				debug!(message = "No id3v1 tag found", offset);
				return Ok(0);
			}
		};
		debug!(message = "Found id3v1 tag", offset, v11 = record.is_v11());

		let mut n_tags = 0;
		for (field, value) in record.tags() {
			if field == Id3v1Field::Genre && !self.config.emit_genre {
				continue;
			}
			sink.add_tag(TagFormat::Id3v1, field.key(), value);
			n_tags += 1;
		}

		if self.config.emit_genre && record.genre().is_none() {
			let code = record.genre_code;
			let level = self.unknown_genre_level(code);
			if level == Level::WARN {
				warn!(message = "Unknown id3v1 genre code", genre_code = code);
			} else if level == Level::DEBUG {
				debug!(message = "Unknown id3v1 genre code", genre_code = code);
			} else {
				trace!(message = "Record has no genre", genre_code = code);
			}
		}

		return Ok(n_tags);
	}

	/// The level we log a genre code that isn't in the table at
	fn unknown_genre_level(&self, code: u8) -> Level {
		if code == genre::NO_GENRE {
			return Level::TRACE;
		}

		match self.config.unknown_genre {
			UnknownGenre::Warn => Level::WARN,
			UnknownGenre::Ignore => Level::DEBUG,
		}
	}
}
