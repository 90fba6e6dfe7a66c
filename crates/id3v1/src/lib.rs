//! Read ID3v1 tags, the fixed 128-byte metadata record
//! found at the very end of many audio files.
//!
//! This is the lowest-fidelity tag format we know about,
//! so it is usually read last, after every other parser has
//! had a look at the file. See [`id3v1::Id3v1Reader`].

pub mod common;
pub mod id3v1;
