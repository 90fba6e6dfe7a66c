//! Cross-format normalized tag types

use serde_with::{DeserializeFromStr, SerializeDisplay};
use smartstring::{LazyCompact, SmartString};
use std::{fmt::Display, str::FromStr};

/// A universal tag type
#[derive(Debug, Hash, PartialEq, Eq, Clone, DeserializeFromStr, SerializeDisplay)]
pub enum TagType {
	/// A tag we didn't recognize
	Other(SmartString<LazyCompact>),

	/// Album name
	Album,
	/// Comment
	Comment,
	/// Genre
	Genre,
	/// This track's number in its album
	TrackNumber,
	/// The title of this track
	TrackTitle,
	/// This track's artist
	TrackArtist,
	/// The year this track was released
	Year,
}

impl Display for TagType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", Into::<&str>::into(self))
	}
}

// This is a "user-facing" string.
// File format code should use format-specific strings.
impl<'b, 'a: 'b> From<&'a TagType> for &'b str {
	fn from(value: &'a TagType) -> Self {
		match value {
			// This must match `From<&str>` below
			TagType::Album => "Album",
			TagType::Comment => "Comment",
			TagType::Genre => "Genre",
			TagType::TrackNumber => "TrackNumber",
			TagType::TrackTitle => "Title",
			TagType::TrackArtist => "Artist",
			TagType::Year => "Year",
			TagType::Other(x) => x,
		}
	}
}

impl From<&str> for TagType {
	fn from(s: &str) -> Self {
		// This must match `From<&_>` above
		match s {
			"Album" => Self::Album,
			"Comment" => Self::Comment,
			"Genre" => Self::Genre,
			"TrackNumber" => Self::TrackNumber,
			"Title" => Self::TrackTitle,
			"Artist" => Self::TrackArtist,
			"Year" => Self::Year,
			x => Self::Other(x.into()),
		}
	}
}

impl FromStr for TagType {
	type Err = std::convert::Infallible;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::from(s))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde::{Deserialize, Serialize};

	#[test]
	fn known_names_roundtrip() {
		for t in [
			TagType::Album,
			TagType::Comment,
			TagType::Genre,
			TagType::TrackNumber,
			TagType::TrackTitle,
			TagType::TrackArtist,
			TagType::Year,
		] {
			assert_eq!(TagType::from(t.to_string().as_str()), t);
		}
	}

	#[test]
	fn unknown_name_is_other() {
		assert_eq!(TagType::from("Mood"), TagType::Other("Mood".into()));
		assert_eq!(TagType::Other("Mood".into()).to_string(), "Mood");
	}

	#[derive(Debug, PartialEq, Serialize, Deserialize)]
	struct Mapping {
		key: TagType,
	}

	#[test]
	fn serde_uses_display_names() {
		let m = Mapping {
			key: TagType::TrackTitle,
		};
		let text = toml::to_string(&m).unwrap();
		assert_eq!(text.trim(), r#"key = "Title""#);
		assert_eq!(toml::from_str::<Mapping>(&text).unwrap(), m);

		let m: Mapping = toml::from_str(r#"key = "Mood""#).unwrap();
		assert_eq!(m.key, TagType::Other("Mood".into()));
	}
}
