//! The external tile-pyramid source the converter pulls from, e.g. an
//! MBTiles reader.

use crate::{
	error::Result,
	types::{Blob, TileCoord},
};
use async_trait::async_trait;
use std::fmt::Debug;

/// Metadata reported by a source. The converter requires `minzoom`,
/// `maxzoom` and `bounds`; the descriptive fields are carried through into
/// the produced config document when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileSourceMetadata {
	pub minzoom: Option<u8>,
	pub maxzoom: Option<u8>,
	/// `[west, south, east, north]` in degrees.
	pub bounds: Option<[f64; 4]>,
	pub name: Option<String>,
	pub format: Option<String>,
	pub attribution: Option<String>,
	pub description: Option<String>,
	pub version: Option<String>,
}

#[async_trait]
pub trait TileSourceTrait: Debug + Send + Sync {
	/// Some kind of name for this source, e.g. the filename.
	fn get_name(&self) -> &str;

	async fn get_metadata(&mut self) -> Result<TileSourceMetadata>;

	/// Returns the tile bytes at `coord`, or `None` when the source has no
	/// tile there. Absence is not an error.
	async fn get_tile(&mut self, coord: &TileCoord) -> Result<Option<Blob>>;
}
