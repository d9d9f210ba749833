//! The TileBase handle: opens a file over any backend and answers tile
//! lookups by byte range.

use super::{
	file_header::{FileHeader, HEADER_LENGTH},
	tile_address::TileAddress,
	tile_config::{TileConfig, ValidatedConfig},
};
use crate::{
	error::{Result, TileBaseError},
	io::{data_reader_from_locator, DataReader},
	types::{tile_to_lat, tile_to_lon, Blob, ByteRange, TileCoord},
	utils::decompress_gzip,
};
use log::trace;
use serde::Serialize;

/// Derived description of an open file: zoom range, geographic bounds and
/// the descriptive config fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileSummary {
	pub minzoom: u8,
	pub maxzoom: u8,
	/// `[west, south, east, north]` in degrees.
	pub bounds: [f64; 4],
	/// `[lon, lat]` midpoint of `bounds`.
	pub center: [f64; 2],
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub format: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub attribution: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub version: Option<String>,
}

#[derive(Debug)]
struct OpenState {
	header: FileHeader,
	config: ValidatedConfig,
	index_start: u64,
	tile_start: u64,
}

/// A TileBase file handle. Created unopened; `open()` parses and validates
/// the header and config, after which lookups may run concurrently.
#[derive(Debug)]
pub struct TileBase {
	reader: DataReader,
	state: Option<OpenState>,
}

impl TileBase {
	/// Resolves the locator's scheme to a storage backend. Does not touch
	/// the resource yet.
	pub fn new(locator: &str) -> Result<TileBase> {
		Ok(TileBase {
			reader: data_reader_from_locator(locator)?,
			state: None,
		})
	}

	/// Opens the backend and reads header and config. On any failure the
	/// handle stays unopened and can be retried.
	pub async fn open(&mut self) -> Result<()> {
		if self.state.is_some() {
			return Err(TileBaseError::AlreadyOpen);
		}

		self.reader.open().await?;
		match Self::read_structure(&self.reader).await {
			Ok(state) => {
				trace!(
					"opened '{}': zoom {}..{}, {} bytes of index",
					self.reader.get_name(),
					state.config.min_zoom(),
					state.config.max_zoom(),
					state.config.index_byte_count()
				);
				self.state = Some(state);
				Ok(())
			}
			Err(err) => {
				// release the backend so the handle is cleanly unopened
				let _ = self.reader.close().await;
				Err(err)
			}
		}
	}

	async fn read_structure(reader: &DataReader) -> Result<OpenState> {
		let header = FileHeader::from_reader(reader).await?;

		let config_range = ByteRange::new(HEADER_LENGTH, header.config_length as u64);
		let config_blob = reader.read_range(&config_range).await?;
		let config = TileConfig::from_blob(&config_blob)?.validate()?;

		let index_start = HEADER_LENGTH + header.config_length as u64;
		let tile_start = index_start + config.index_byte_count();

		Ok(OpenState {
			header,
			config,
			index_start,
			tile_start,
		})
	}

	pub async fn close(&mut self) -> Result<()> {
		if self.state.is_none() {
			return Err(TileBaseError::AlreadyClosed);
		}
		self.reader.close().await?;
		self.state = None;
		Ok(())
	}

	pub fn is_open(&self) -> bool {
		self.state.is_some()
	}

	/// Returns the tile bytes at `coord`, or an empty blob for a position
	/// whose record carries the absent sentinel. With `decompress` the
	/// payload is gunzipped before it is returned.
	pub async fn get_tile(&self, coord: &TileCoord, decompress: bool) -> Result<Blob> {
		let state = self.state.as_ref().ok_or(TileBaseError::NotOpen)?;

		let record_range = state
			.config
			.record_range(coord)?
			.get_shifted_forward(state.index_start);
		let address = TileAddress::from_blob(&self.reader.read_range(&record_range).await?)?;

		if address.is_absent() {
			return Ok(Blob::new_empty());
		}

		// offset and size come straight from the file, so the additions
		// must not be trusted to stay within u64
		let tile_offset = state
			.tile_start
			.checked_add(address.offset)
			.filter(|offset| offset.checked_add(address.size).is_some())
			.ok_or(TileBaseError::InvalidFormat)?;
		let tile_range = ByteRange::new(tile_offset, address.size);
		let tile = self.reader.read_range(&tile_range).await?;

		if decompress {
			decompress_gzip(tile)
		} else {
			Ok(tile)
		}
	}

	/// Zoom range, geographic bounds and center derived from the config.
	/// Bounds come from projecting the corners of the max-zoom bbox back
	/// to longitude/latitude.
	pub fn get_summary(&self) -> Result<TileSummary> {
		let state = self.state.as_ref().ok_or(TileBaseError::NotOpen)?;
		let config = &state.config;

		let max = config.max_zoom();
		// validate() guarantees an entry for every zoom in range
		let bbox = config.level(max).ok_or(TileBaseError::ZoomNotSupported)?;

		let west = tile_to_lon(bbox.x_min as f64, max);
		let north = tile_to_lat(bbox.y_min as f64, max);
		let east = tile_to_lon(bbox.x_max as f64 + 1.0, max);
		let south = tile_to_lat(bbox.y_max as f64 + 1.0, max);

		Ok(TileSummary {
			minzoom: config.min_zoom(),
			maxzoom: max,
			bounds: [west, south, east, north],
			center: [(west + east) / 2.0, (south + north) / 2.0],
			name: config.name.clone(),
			format: config.format.clone(),
			attribution: config.attribution.clone(),
			description: config.description.clone(),
			version: config.version.clone(),
		})
	}

	/// Format version of the open file.
	pub fn get_version(&self) -> Result<u8> {
		let state = self.state.as_ref().ok_or(TileBaseError::NotOpen)?;
		Ok(state.header.version)
	}

	/// Validated config of the open file.
	pub fn get_config(&self) -> Result<&ValidatedConfig> {
		let state = self.state.as_ref().ok_or(TileBaseError::NotOpen)?;
		Ok(&state.config)
	}

	pub fn get_name(&self) -> &str {
		self.reader.get_name()
	}
}
