//! Builds a TileBase file from a tile-pyramid source.
//!
//! The index records are written in the exact order the reader computes
//! them: zoom ascending, then y ascending, then x ascending. Both sides
//! derive their positions from `ValidatedConfig`/`TileBBox`, so the write
//! order and the lookup arithmetic cannot drift apart.

use super::{
	file_header::FileHeader,
	reader::TileBase,
	tile_address::TileAddress,
	tile_config::{TileConfig, ValidatedConfig},
	tile_source::TileSourceTrait,
};
use crate::{
	error::{Result, TileBaseError},
	types::{Blob, TileBBox, TileCoord},
	io::{DataWriterFile, DataWriterTrait},
};
use log::{debug, trace};
use std::{
	collections::BTreeMap,
	fs,
	io,
	path::{Path, PathBuf},
};

/// Converts `source` into a TileBase file at `path` and returns an opened
/// handle against it. The file is assembled at temporary paths and renamed
/// into place on success, so readers never observe a partial file.
pub async fn convert(source: &mut dyn TileSourceTrait, path: &Path) -> Result<TileBase> {
	let metadata = source.get_metadata().await?;

	let minzoom = metadata.minzoom.ok_or(TileBaseError::MissingMetadata("minzoom"))?;
	let maxzoom = metadata.maxzoom.ok_or(TileBaseError::MissingMetadata("maxzoom"))?;
	let bounds = metadata.bounds.ok_or(TileBaseError::MissingMetadata("bounds"))?;

	debug!(
		"converting '{}' (zoom {minzoom}..{maxzoom}, bounds {bounds:?}) to {path:?}",
		source.get_name()
	);

	let mut ranges = BTreeMap::new();
	for z in minzoom..=maxzoom {
		let bbox = TileBBox::from_geo_bounds(z, &bounds)?;
		ranges.insert(z.to_string(), bbox.as_array().map(|v| v as i64).to_vec());
	}

	let config = TileConfig {
		min: minzoom,
		max: maxzoom,
		ranges,
		name: metadata.name,
		format: metadata.format,
		attribution: metadata.attribution,
		description: metadata.description,
		version: metadata.version,
	};
	let validated = config.validate()?;

	let config_blob = config.to_blob()?;
	if config_blob.len() > u32::MAX as u64 {
		return Err(TileBaseError::InvalidConfig(
			"config exceeds the allowed byte size".to_string(),
		));
	}
	let header = FileHeader::new(config_blob.len() as u32);

	let temp_path = sibling_path(path, ".tmp")?;
	let staging_path = sibling_path(path, ".tmp.tiles")?;

	let result = write_segments(source, &validated, &header, &config_blob, &temp_path, &staging_path).await;
	let _ = fs::remove_file(&staging_path);
	if result.is_err() {
		let _ = fs::remove_file(&temp_path);
	}
	result?;

	fs::rename(&temp_path, path)?;

	let mut tilebase = TileBase::new(&path.to_string_lossy())?;
	tilebase.open().await?;
	Ok(tilebase)
}

/// Writes header | config | index into `temp_path` while the tile payloads
/// accumulate in `staging_path`, then appends the staged payloads.
async fn write_segments(
	source: &mut dyn TileSourceTrait,
	validated: &ValidatedConfig,
	header: &FileHeader,
	config_blob: &Blob,
	temp_path: &Path,
	staging_path: &Path,
) -> Result<()> {
	let mut writer = DataWriterFile::new(temp_path)?;
	writer.append(&header.to_blob()?)?;
	writer.append(config_blob)?;

	let mut staging = DataWriterFile::new(staging_path)?;
	let mut running_offset = 0u64;

	for bbox in validated.levels() {
		trace!("writing index records for {bbox:?}");
		for y in bbox.y_min..=bbox.y_max {
			for x in bbox.x_min..=bbox.x_max {
				let coord = TileCoord::new(bbox.z, x, y)?;
				let tile = source.get_tile(&coord).await?.unwrap_or_else(Blob::new_empty);

				writer.append(&TileAddress::new(running_offset, tile.len()).to_blob()?)?;
				if !tile.is_empty() {
					staging.append(&tile)?;
				}
				running_offset += tile.len();
			}
		}
	}

	writer.finish()?;
	staging.finish()?;
	drop(writer);
	drop(staging);

	let mut output = fs::OpenOptions::new().append(true).open(temp_path)?;
	let mut tiles = fs::File::open(staging_path)?;
	io::copy(&mut tiles, &mut output)?;
	Ok(())
}

fn sibling_path(path: &Path, suffix: &str) -> Result<PathBuf> {
	let name = path
		.file_name()
		.ok_or_else(|| TileBaseError::ConnectivityFailure(format!("invalid output path {path:?}")))?;
	let mut name = name.to_os_string();
	name.push(suffix);
	Ok(path.with_file_name(name))
}
