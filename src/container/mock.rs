//! A deterministic in-memory tile source for tests and examples.

use super::tile_source::{TileSourceMetadata, TileSourceTrait};
use crate::{
	error::Result,
	types::{Blob, TileCoord},
	utils::compress_gzip,
};
use async_trait::async_trait;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy)]
pub enum MockProfile {
	/// Tile payloads are plain text derived from the coordinate.
	Raw,
	/// Payloads are gzip-compressed, as MBTiles vector tiles usually are.
	Gzip,
}

#[derive(Debug)]
pub struct MockTileSource {
	pub metadata: TileSourceMetadata,
	profile: MockProfile,
	absent: HashSet<(u8, u32, u32)>,
}

impl MockTileSource {
	pub fn new(minzoom: u8, maxzoom: u8, bounds: [f64; 4], profile: MockProfile) -> MockTileSource {
		MockTileSource {
			metadata: TileSourceMetadata {
				minzoom: Some(minzoom),
				maxzoom: Some(maxzoom),
				bounds: Some(bounds),
				..TileSourceMetadata::default()
			},
			profile,
			absent: HashSet::new(),
		}
	}

	/// Marks a position as having no tile.
	pub fn skip(&mut self, z: u8, x: u32, y: u32) {
		self.absent.insert((z, x, y));
	}

	/// The uncompressed payload every profile produces for `coord`.
	pub fn payload(coord: &TileCoord) -> Blob {
		Blob::from(format!("tile {}/{}/{}", coord.z, coord.x, coord.y))
	}
}

#[async_trait]
impl TileSourceTrait for MockTileSource {
	fn get_name(&self) -> &str {
		"mock source"
	}

	async fn get_metadata(&mut self) -> Result<TileSourceMetadata> {
		Ok(self.metadata.clone())
	}

	async fn get_tile(&mut self, coord: &TileCoord) -> Result<Option<Blob>> {
		if self.absent.contains(&(coord.z, coord.x, coord.y)) {
			return Ok(None);
		}
		let payload = Self::payload(coord);
		Ok(Some(match self.profile {
			MockProfile::Raw => payload,
			MockProfile::Gzip => compress_gzip(payload)?,
		}))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::utils::decompress_gzip;

	#[tokio::test]
	async fn deterministic_payloads() -> Result<()> {
		let mut source = MockTileSource::new(0, 4, [-180.0, -85.0, 180.0, 85.0], MockProfile::Raw);
		let coord = TileCoord::new(3, 1, 2)?;

		let tile = source.get_tile(&coord).await?.unwrap();
		assert_eq!(tile.as_str(), "tile 3/1/2");
		assert_eq!(tile, MockTileSource::payload(&coord));
		Ok(())
	}

	#[tokio::test]
	async fn gzip_profile_compresses() -> Result<()> {
		let mut source = MockTileSource::new(0, 4, [-180.0, -85.0, 180.0, 85.0], MockProfile::Gzip);
		let coord = TileCoord::new(2, 3, 0)?;

		let tile = source.get_tile(&coord).await?.unwrap();
		assert_ne!(tile, MockTileSource::payload(&coord));
		assert_eq!(decompress_gzip(tile)?, MockTileSource::payload(&coord));
		Ok(())
	}

	#[tokio::test]
	async fn skipped_positions_are_absent() -> Result<()> {
		let mut source = MockTileSource::new(0, 4, [-180.0, -85.0, 180.0, 85.0], MockProfile::Raw);
		source.skip(1, 0, 0);

		assert!(source.get_tile(&TileCoord::new(1, 0, 0)?).await?.is_none());
		assert!(source.get_tile(&TileCoord::new(1, 1, 0)?).await?.is_some());
		Ok(())
	}
}
