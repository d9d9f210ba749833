//! The embedded JSON config document and the zoom/x/y → record addressing
//! derived from it.
//!
//! [`TileConfig`] is the raw serde model of the JSON bytes. [`validate`]
//! checks it and produces a fresh [`ValidatedConfig`]; the parsed input is
//! never coerced in place. All record positions are computed on demand from
//! the validated per-zoom bounding boxes, there is no materialized index.
//!
//! [`validate`]: TileConfig::validate

use super::tile_address::TILE_ADDRESS_LENGTH;
use crate::{
	error::{Result, TileBaseError},
	types::{Blob, ByteRange, TileBBox, TileCoord},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw config document as embedded in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileConfig {
	pub min: u8,
	pub max: u8,
	pub ranges: BTreeMap<String, Vec<i64>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub format: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub attribution: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub version: Option<String>,
}

impl TileConfig {
	pub fn from_blob(blob: &Blob) -> Result<TileConfig> {
		serde_json::from_slice(blob.as_slice())
			.map_err(|e| TileBaseError::InvalidConfig(format!("config could not be parsed: {e}")))
	}

	pub fn to_blob(&self) -> Result<Blob> {
		let bytes = serde_json::to_vec(self)
			.map_err(|e| TileBaseError::InvalidConfig(format!("config could not be serialized: {e}")))?;
		Ok(Blob::from(bytes))
	}

	/// Checks the per-zoom invariants and returns a validated copy. For every
	/// zoom in `[min, max]` a `ranges` entry must exist with exactly 4
	/// non-negative tile bounds that fit the `2^z` grid, with
	/// `minX <= maxX` and `minY <= maxY`.
	pub fn validate(&self) -> Result<ValidatedConfig> {
		if self.min > self.max {
			return Err(TileBaseError::InvalidConfig(format!(
				".min ({}) must be <= .max ({})",
				self.min, self.max
			)));
		}
		if self.max > 31 {
			return Err(TileBaseError::InvalidConfig(format!(
				".max ({}) must be <= 31",
				self.max
			)));
		}

		let mut levels = BTreeMap::new();
		for z in self.min..=self.max {
			let range = self
				.ranges
				.get(&z.to_string())
				.ok_or_else(|| TileBaseError::InvalidConfig(format!(".ranges is missing zoom {z}")))?;

			if range.len() != 4 {
				return Err(TileBaseError::InvalidConfig(format!(
					".ranges.{z} must contain 4 tile bounds, found {}",
					range.len()
				)));
			}

			let grid = 2i64.pow(z as u32);
			for value in range {
				if *value < 0 || *value >= grid {
					return Err(TileBaseError::InvalidConfig(format!(
						".ranges.{z} bound {value} is outside the 2^{z} grid"
					)));
				}
			}

			let (x_min, y_min, x_max, y_max) = (range[0], range[1], range[2], range[3]);
			if x_min > x_max {
				return Err(TileBaseError::InvalidConfig(format!(
					".ranges.{z} minX ({x_min}) must be <= maxX ({x_max})"
				)));
			}
			if y_min > y_max {
				return Err(TileBaseError::InvalidConfig(format!(
					".ranges.{z} minY ({y_min}) must be <= maxY ({y_max})"
				)));
			}

			levels.insert(
				z,
				TileBBox::new(z, x_min as u32, y_min as u32, x_max as u32, y_max as u32)?,
			);
		}

		Ok(ValidatedConfig {
			min: self.min,
			max: self.max,
			levels,
			name: self.name.clone(),
			format: self.format.clone(),
			attribution: self.attribution.clone(),
			description: self.description.clone(),
			version: self.version.clone(),
		})
	}
}

/// Immutable, validated view of the config, carrying the derived per-zoom
/// bounding boxes. Held for the lifetime of an open handle.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
	min: u8,
	max: u8,
	levels: BTreeMap<u8, TileBBox>,
	pub name: Option<String>,
	pub format: Option<String>,
	pub attribution: Option<String>,
	pub description: Option<String>,
	pub version: Option<String>,
}

impl ValidatedConfig {
	pub fn min_zoom(&self) -> u8 {
		self.min
	}

	pub fn max_zoom(&self) -> u8 {
		self.max
	}

	pub fn level(&self, z: u8) -> Option<&TileBBox> {
		self.levels.get(&z)
	}

	pub fn levels(&self) -> impl Iterator<Item = &TileBBox> {
		self.levels.values()
	}

	/// Total number of tile positions across all zoom levels.
	pub fn count_tiles(&self) -> u64 {
		self.levels.values().map(TileBBox::count_tiles).sum()
	}

	/// Size of the address-index segment in bytes.
	pub fn index_byte_count(&self) -> u64 {
		self.count_tiles() * TILE_ADDRESS_LENGTH
	}

	/// The 16-byte record position for `coord`, relative to the start of the
	/// index segment. Records are laid out zoom ascending, then y ascending,
	/// then x ascending.
	pub fn record_range(&self, coord: &TileCoord) -> Result<ByteRange> {
		if coord.z < self.min || coord.z > self.max {
			return Err(TileBaseError::ZoomNotSupported);
		}
		let bbox = self.level(coord.z).ok_or(TileBaseError::ZoomNotSupported)?;

		bbox.check_coord(coord)?;

		// tiles in all zooms strictly below the requested one
		let cumulative: u64 = self
			.levels
			.range(..coord.z)
			.map(|(_, level)| level.count_tiles())
			.sum();

		let record_index = cumulative + bbox.row_major_index(coord);
		Ok(ByteRange::new(record_index * TILE_ADDRESS_LENGTH, TILE_ADDRESS_LENGTH))
	}
}
