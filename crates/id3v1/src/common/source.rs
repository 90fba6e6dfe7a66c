//! Random-access byte sources that tag readers pull data from

use async_trait::async_trait;
use bytes::Bytes;
use std::{
	io::{Error, ErrorKind, SeekFrom},
	ops::{Deref, DerefMut},
};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

/// A source of bytes with a read head.
///
/// Readers may jump around, but only ever have one
/// read in flight at a time.
#[async_trait]
pub trait ByteSource: Send {
	/// The total number of bytes in this source,
	/// or `None` if we can't know it (a network stream, for example).
	fn total_size(&self) -> Option<u64>;

	/// The position of our read head
	fn position(&self) -> u64;

	/// Move the read head. This never does i/o by itself;
	/// the next read starts from `position`.
	fn set_position(&mut self, position: u64);

	/// Fill `buf` with bytes read at `at`, or at the current position
	/// if `at` is `None`. The read head ends up right after the last byte read.
	///
	/// A short read is an error (`UnexpectedEof`).
	async fn read_bytes(&mut self, buf: &mut [u8], at: Option<u64>) -> Result<(), Error>;

	/// Move the read head forward by `count` bytes.
	async fn skip(&mut self, count: u64) -> Result<(), Error> {
		let target = self
			.position()
			.checked_add(count)
			.ok_or_else(|| Error::new(ErrorKind::InvalidInput, "skip overflows source position"))?;
		self.set_position(target);
		return Ok(());
	}
}

/// Saves a source's position, and puts it back when dropped.
///
/// The guard derefs to the source, so it can be read through
/// while the position is held.
pub struct PositionGuard<'a, S>
where
	S: ByteSource + ?Sized,
{
	source: &'a mut S,
	saved: u64,
}

impl<'a, S: ByteSource + ?Sized> PositionGuard<'a, S> {
	pub fn new(source: &'a mut S) -> Self {
		let saved = source.position();
		Self { source, saved }
	}

	/// The position that will be restored
	pub fn saved_position(&self) -> u64 {
		self.saved
	}
}

impl<S: ByteSource + ?Sized> Deref for PositionGuard<'_, S> {
	type Target = S;

	fn deref(&self) -> &Self::Target {
		self.source
	}
}

impl<S: ByteSource + ?Sized> DerefMut for PositionGuard<'_, S> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		self.source
	}
}

impl<S: ByteSource + ?Sized> Drop for PositionGuard<'_, S> {
	fn drop(&mut self) {
		self.source.set_position(self.saved);
	}
}

/// A [`ByteSource`] backed by a buffer in memory.
#[derive(Debug, Clone)]
pub struct BufferSource {
	data: Bytes,
	position: u64,

	// If false, pretend we don't know how long `data` is.
	size_known: bool,
}

impl BufferSource {
	pub fn new(data: impl Into<Bytes>) -> Self {
		Self {
			data: data.into(),
			position: 0,
			size_known: true,
		}
	}

	/// Make a source that doesn't report its size,
	/// like a stream with no content length.
	pub fn unknown_size(data: impl Into<Bytes>) -> Self {
		Self {
			size_known: false,
			..Self::new(data)
		}
	}
}

#[async_trait]
impl ByteSource for BufferSource {
	fn total_size(&self) -> Option<u64> {
		self.size_known
			.then(|| u64::try_from(self.data.len()).unwrap())
	}

	fn position(&self) -> u64 {
		self.position
	}

	fn set_position(&mut self, position: u64) {
		self.position = position;
	}

	async fn read_bytes(&mut self, buf: &mut [u8], at: Option<u64>) -> Result<(), Error> {
		let start = at.unwrap_or(self.position);
		let range = usize::try_from(start)
			.ok()
			.and_then(|s| Some(s..s.checked_add(buf.len())?))
			.filter(|r| r.end <= self.data.len())
			.ok_or_else(|| Error::new(ErrorKind::UnexpectedEof, "read past end of buffer"))?;

		self.position = u64::try_from(range.end).unwrap();
		buf.copy_from_slice(&self.data[range]);
		return Ok(());
	}
}

/// A [`ByteSource`] over any async reader that can seek.
///
/// Moving the read head is lazy: we only seek the inner
/// reader when a read starts somewhere it isn't.
#[derive(Debug)]
pub struct ReaderSource<R> {
	inner: R,
	size: Option<u64>,
	position: u64,

	// Where `inner` actually is.
	// None if we don't know (after a failed read, for example).
	inner_position: Option<u64>,
}

impl<R> ReaderSource<R>
where
	R: AsyncRead + AsyncSeek + Unpin + Send,
{
	/// Wrap `inner`, reading from position zero.
	/// `size` is the total length of `inner`, if known.
	pub fn new(inner: R, size: Option<u64>) -> Self {
		Self {
			inner,
			size,
			position: 0,
			inner_position: None,
		}
	}

	/// Wrap `inner`, finding its size by seeking to its end.
	pub async fn from_seekable(mut inner: R) -> Result<Self, Error> {
		let size = inner.seek(SeekFrom::End(0)).await?;
		Ok(Self {
			inner,
			size: Some(size),
			position: 0,
			inner_position: Some(size),
		})
	}

	pub fn into_inner(self) -> R {
		self.inner
	}
}

#[async_trait]
impl<R> ByteSource for ReaderSource<R>
where
	R: AsyncRead + AsyncSeek + Unpin + Send,
{
	fn total_size(&self) -> Option<u64> {
		self.size
	}

	fn position(&self) -> u64 {
		self.position
	}

	fn set_position(&mut self, position: u64) {
		self.position = position;
	}

	async fn read_bytes(&mut self, buf: &mut [u8], at: Option<u64>) -> Result<(), Error> {
		let start = at.unwrap_or(self.position);

		if self.inner_position != Some(start) {
			self.inner_position = None;
			self.inner.seek(SeekFrom::Start(start)).await?;
		}

		// Forget where we are until the read succeeds
		self.inner_position = None;
		self.inner.read_exact(buf).await?;

		let end = start + u64::try_from(buf.len()).unwrap();
		self.position = end;
		self.inner_position = Some(end);
		return Ok(());
	}
}
