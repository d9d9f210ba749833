//! S3 (and S3-compatible) backend using ranged `GetObject` requests.

use super::DataReaderTrait;
use crate::{
	error::{Result, TileBaseError},
	types::{Blob, ByteRange},
};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use std::fmt;
use url::Url;

pub struct DataReaderS3 {
	name: String,
	bucket: String,
	key: String,
	client: Option<Client>,
	size: u64,
	closed: bool,
}

impl DataReaderS3 {
	/// Builds a reader from an `s3://bucket/key` locator.
	pub fn from_url(url: &Url) -> Result<Box<DataReaderS3>> {
		let bucket = url
			.host_str()
			.ok_or_else(|| TileBaseError::ConnectivityFailure(format!("missing bucket in '{url}'")))?
			.to_string();
		let key = url.path().trim_start_matches('/').to_string();
		if key.is_empty() {
			return Err(TileBaseError::ConnectivityFailure(format!("missing key in '{url}'")));
		}

		Ok(Box::new(DataReaderS3 {
			name: url.to_string(),
			bucket,
			key,
			client: None,
			size: 0,
			closed: false,
		}))
	}
}

#[async_trait]
impl DataReaderTrait for DataReaderS3 {
	async fn open(&mut self) -> Result<()> {
		if self.client.is_some() {
			return Err(TileBaseError::AlreadyOpen);
		}

		let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
		let client = Client::new(&config);

		// HEAD once to confirm the object exists and learn its size
		let head = client
			.head_object()
			.bucket(&self.bucket)
			.key(&self.key)
			.send()
			.await
			.map_err(|e| TileBaseError::ConnectivityFailure(format!("cannot reach '{}': {e}", self.name)))?;

		self.size = head.content_length().unwrap_or(0) as u64;
		self.client = Some(client);
		self.closed = false;
		Ok(())
	}

	async fn read_range(&self, range: &ByteRange) -> Result<Blob> {
		let client = self.client.as_ref().ok_or(TileBaseError::NotOpen)?;

		// checked addition: a huge offset must not wrap past the size check
		let end = range.offset.checked_add(range.length);
		if end.map_or(true, |end| end > self.size) {
			return Err(TileBaseError::ShortRead {
				expected: range.length,
				actual: self.size.saturating_sub(range.offset),
			});
		}

		if range.length == 0 {
			return Ok(Blob::new_empty());
		}

		let request_range = format!("bytes={}-{}", range.offset, range.offset + range.length - 1);
		let response = client
			.get_object()
			.bucket(&self.bucket)
			.key(&self.key)
			.range(request_range)
			.send()
			.await
			.map_err(|e| TileBaseError::ConnectivityFailure(e.to_string()))?;

		let bytes = response
			.body
			.collect()
			.await
			.map_err(|e| TileBaseError::ConnectivityFailure(e.to_string()))?
			.into_bytes();

		if bytes.len() as u64 != range.length {
			return Err(TileBaseError::ShortRead {
				expected: range.length,
				actual: bytes.len() as u64,
			});
		}

		Ok(Blob::from(bytes.to_vec()))
	}

	async fn close(&mut self) -> Result<()> {
		if self.closed {
			return Err(TileBaseError::AlreadyClosed);
		}
		if self.client.is_none() {
			return Err(TileBaseError::NotOpen);
		}
		self.client = None;
		self.closed = true;
		Ok(())
	}

	fn get_name(&self) -> &str {
		&self.name
	}
}

impl fmt::Debug for DataReaderS3 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DataReaderS3")
			.field("bucket", &self.bucket)
			.field("key", &self.key)
			.field("size", &self.size)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_bucket_and_key() -> Result<()> {
		let url = Url::parse("s3://tiles/planet/world.tb").unwrap();
		let reader = DataReaderS3::from_url(&url)?;
		assert_eq!(reader.bucket, "tiles");
		assert_eq!(reader.key, "planet/world.tb");
		assert_eq!(reader.get_name(), "s3://tiles/planet/world.tb");
		Ok(())
	}

	#[test]
	fn rejects_missing_key() {
		let url = Url::parse("s3://tiles").unwrap();
		assert!(DataReaderS3::from_url(&url).is_err());
	}

	#[tokio::test]
	async fn read_before_open_fails() -> Result<()> {
		let url = Url::parse("s3://tiles/world.tb").unwrap();
		let reader = DataReaderS3::from_url(&url)?;
		assert!(matches!(
			reader.read_range(&ByteRange::new(0, 7)).await,
			Err(TileBaseError::NotOpen)
		));
		Ok(())
	}
}
