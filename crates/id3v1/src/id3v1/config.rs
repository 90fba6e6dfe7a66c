//! ID3v1 reader settings.
//! All fields have defaults, so an empty table is a valid config.

use serde::Deserialize;

/// What to do with genre codes that aren't in the genre table
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownGenre {
	/// Skip the genre, and log at `debug`
	Ignore,

	/// Skip the genre, and log a warning
	Warn,
}

impl Default for UnknownGenre {
	fn default() -> Self {
		Self::Warn
	}
}

/// ID3v1 reader settings
#[derive(Deserialize, Debug, Clone)]
pub struct Id3v1Config {
	#[serde(default)]
	pub unknown_genre: UnknownGenre,

	/// If false, never emit a genre tag.
	#[serde(default = "Id3v1Config::default_emit_genre")]
	pub emit_genre: bool,
}

impl Default for Id3v1Config {
	fn default() -> Self {
		Self {
			unknown_genre: UnknownGenre::default(),
			emit_genre: Self::default_emit_genre(),
		}
	}
}

impl Id3v1Config {
	fn default_emit_genre() -> bool {
		true
	}
}
