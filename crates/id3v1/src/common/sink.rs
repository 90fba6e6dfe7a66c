//! Where decoded tags go

use smartstring::{LazyCompact, SmartString};
use std::fmt::Display;

/// The tag format a value was read from.
/// Collectors use this to keep formats apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagFormat {
	/// A 128-byte ID3v1 (or ID3v1.1) record
	Id3v1,

	/// An APEv2 tag
	Ape,
}

impl Display for TagFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Id3v1 => write!(f, "ID3v1"),
			Self::Ape => write!(f, "APEv2"),
		}
	}
}

/// The value of a single tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
	/// A text value. Never empty.
	Text(SmartString<LazyCompact>),

	/// A numeric value, like a track number
	Number(u32),
}

impl Display for TagValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Text(x) => write!(f, "{x}"),
			Self::Number(x) => write!(f, "{x}"),
		}
	}
}

impl From<&str> for TagValue {
	fn from(value: &str) -> Self {
		Self::Text(value.into())
	}
}

impl From<u32> for TagValue {
	fn from(value: u32) -> Self {
		Self::Number(value)
	}
}

/// One tag, as handed to a [`TagSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTag {
	pub format: TagFormat,

	/// This tag's key in `format`'s own namespace (`"title"` for ID3v1).
	/// Mapping keys across formats is not our job.
	pub key: SmartString<LazyCompact>,

	pub value: TagValue,
}

/// Something that collects tags.
///
/// Readers call `add_tag` once per tag, in the order
/// tags appear in the file.
pub trait TagSink: Send {
	/// Record one tag. `key` is native to `format`.
	fn add_tag(&mut self, format: TagFormat, key: &str, value: TagValue);
}

impl TagSink for Vec<ExtractedTag> {
	fn add_tag(&mut self, format: TagFormat, key: &str, value: TagValue) {
		self.push(ExtractedTag {
			format,
			key: key.into(),
			value,
		});
	}
}
