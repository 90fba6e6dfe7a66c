//! ID3v1 errors
use thiserror::Error;

/// An error we hit while reading an ID3v1 tag.
///
/// A missing tag is not an error.
#[derive(Debug, Error)]
pub enum Id3v1Error {
	/// We encountered an i/o error while reading the record,
	/// or the source ended before we could read all 128 bytes.
	#[error("io error while reading id3v1 tag")]
	IoError(#[from] std::io::Error),

	/// The parser for the tag in front of this one failed
	#[error("error while reading trailing tag before id3v1")]
	NeighborTag(#[source] Box<dyn std::error::Error + Send + Sync>),
}
