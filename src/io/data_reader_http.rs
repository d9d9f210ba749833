//! HTTP(S) backend using `Range: bytes=start-end` requests.

use super::DataReaderTrait;
use crate::{
	error::{Result, TileBaseError},
	types::{Blob, ByteRange},
};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode, Url};
use std::time::Duration;

#[derive(Debug)]
pub struct DataReaderHttp {
	name: String,
	url: Url,
	client: Option<Client>,
	closed: bool,
}

impl DataReaderHttp {
	pub fn from_url(url: Url) -> Box<DataReaderHttp> {
		Box::new(DataReaderHttp {
			name: url.to_string(),
			url,
			client: None,
			closed: false,
		})
	}
}

#[async_trait]
impl DataReaderTrait for DataReaderHttp {
	async fn open(&mut self) -> Result<()> {
		if self.client.is_some() {
			return Err(TileBaseError::AlreadyOpen);
		}

		let client = Client::builder()
			.tcp_keepalive(Duration::from_secs(600))
			.use_rustls_tls()
			.build()
			.map_err(|e| TileBaseError::ConnectivityFailure(e.to_string()))?;

		// cheap reachability probe before any range request is issued
		let response = client
			.head(self.url.clone())
			.send()
			.await
			.map_err(|e| TileBaseError::ConnectivityFailure(e.to_string()))?;
		if !response.status().is_success() {
			return Err(TileBaseError::ConnectivityFailure(format!(
				"'{}' answered {}",
				self.name,
				response.status()
			)));
		}

		self.client = Some(client);
		self.closed = false;
		Ok(())
	}

	async fn read_range(&self, range: &ByteRange) -> Result<Blob> {
		let client = self.client.as_ref().ok_or(TileBaseError::NotOpen)?;

		if range.length == 0 {
			return Ok(Blob::new_empty());
		}

		let last = range
			.offset
			.checked_add(range.length - 1)
			.ok_or(TileBaseError::ShortRead {
				expected: range.length,
				actual: 0,
			})?;
		let request_range = format!("bytes={}-{}", range.offset, last);
		let response = client
			.get(self.url.clone())
			.header(header::RANGE, request_range)
			.send()
			.await
			.map_err(|e| TileBaseError::ConnectivityFailure(e.to_string()))?;

		if response.status() != StatusCode::PARTIAL_CONTENT {
			return Err(TileBaseError::ConnectivityFailure(format!(
				"expected HTTP 206 (Partial Content) from '{}', got {}",
				self.name,
				response.status()
			)));
		}

		let bytes = response
			.bytes()
			.await
			.map_err(|e| TileBaseError::ConnectivityFailure(e.to_string()))?;

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

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keeps_locator_as_name() {
		let url = Url::parse("https://example.org/planet.tb").unwrap();
		let reader = DataReaderHttp::from_url(url);
		assert_eq!(reader.get_name(), "https://example.org/planet.tb");
	}

	#[tokio::test]
	async fn read_before_open_fails() {
		let url = Url::parse("https://example.org/planet.tb").unwrap();
		let reader = DataReaderHttp::from_url(url);
		assert!(matches!(
			reader.read_range(&ByteRange::new(0, 7)).await,
			Err(TileBaseError::NotOpen)
		));
	}
}
