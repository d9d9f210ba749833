//! The ranged-read abstraction shared by all storage backends.
//!
//! A `DataReader` hands back exactly the requested number of bytes or fails;
//! partial reads are surfaced as [`TileBaseError::ShortRead`]. Reads are
//! positioned and take `&self`, so one open reader can serve concurrent
//! lookups. Opening and closing take `&mut self` and are serialized by the
//! borrow checker.

use super::{DataReaderFile, DataReaderHttp, DataReaderS3};
use crate::{
	error::{Result, TileBaseError},
	types::{Blob, ByteRange},
};
use async_trait::async_trait;
use std::{fmt::Debug, path::Path};
use url::Url;

pub type DataReader = Box<dyn DataReaderTrait>;

#[async_trait]
pub trait DataReaderTrait: Debug + Send + Sync {
	/// Connects to the resource. Fails with `ConnectivityFailure` if it
	/// cannot be reached or opened.
	async fn open(&mut self) -> Result<()>;

	/// Reads exactly `range.length` bytes starting at `range.offset`.
	async fn read_range(&self, range: &ByteRange) -> Result<Blob>;

	/// Releases the resource. `NotOpen` before the first open, then
	/// `AlreadyClosed` on a second close.
	async fn close(&mut self) -> Result<()>;

	/// The locator this reader was built from, e.g. for log messages.
	fn get_name(&self) -> &str;
}

/// Selects a backend by the locator's scheme: `file://` (or a plain path),
/// `http://`, `https://` or `s3://bucket/key`.
pub fn data_reader_from_locator(locator: &str) -> Result<DataReader> {
	if !locator.contains("://") {
		return Ok(DataReaderFile::new(Path::new(locator)));
	}

	let url = Url::parse(locator).map_err(|e| TileBaseError::ConnectivityFailure(e.to_string()))?;
	match url.scheme() {
		"file" => Ok(DataReaderFile::new(Path::new(url.path()))),
		"http" | "https" => Ok(DataReaderHttp::from_url(url)),
		"s3" => Ok(DataReaderS3::from_url(&url)?),
		scheme => Err(TileBaseError::UnsupportedScheme(scheme.to_string())),
	}
}
