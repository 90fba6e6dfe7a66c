//! Check for an ID3v1 tag without reading it

use super::{errors::Id3v1Error, ID3V1_LEN_U64, ID3V1_SIGNATURE};
use crate::common::source::{ByteSource, PositionGuard};

/// Does `source` end with an ID3v1 record?
///
/// This only reads the three signature bytes, and always leaves
/// the source's position where it was (even if the read fails).
/// Sources that are shorter than a record, or don't know their
/// size, never have one.
pub async fn has_id3v1<S>(source: &mut S) -> Result<bool, Id3v1Error>
where
	S: ByteSource + ?Sized,
{
	let offset = match source.total_size() {
		Some(size) if size >= ID3V1_LEN_U64 => size - ID3V1_LEN_U64,
		_ => return Ok(false),
	};

	let mut source = PositionGuard::new(source);
	let mut block = [0u8; 3];
	source.read_bytes(&mut block, Some(offset)).await?;

	return Ok(&block == ID3V1_SIGNATURE);
}
