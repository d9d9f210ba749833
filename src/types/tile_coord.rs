//! Slippy-map tile coordinates and the Web-Mercator projection between
//! tile indices and longitude/latitude.

use crate::error::{Result, TileBaseError};
use std::{
	f64::consts::PI,
	fmt::{self, Debug},
};

/// A tile position `(z, x, y)` within a `2^z` grid.
#[derive(Eq, PartialEq, Clone, Copy, Hash)]
pub struct TileCoord {
	pub z: u8,
	pub x: u32,
	pub y: u32,
}

impl TileCoord {
	/// Creates a coordinate, checking that it addresses a real grid cell:
	/// `z <= 31` and `x, y < 2^z`.
	pub fn new(z: u8, x: u32, y: u32) -> Result<TileCoord> {
		if z > 31 {
			return Err(TileBaseError::InvalidCoordinate);
		}
		let max = 2u64.pow(z as u32);
		if (x as u64) >= max || (y as u64) >= max {
			return Err(TileBaseError::InvalidCoordinate);
		}
		Ok(TileCoord { z, x, y })
	}

	/// Projects a geographic point to the tile containing it at zoom `z`,
	/// clamped into the grid.
	pub fn from_geo(lon: f64, lat: f64, z: u8) -> TileCoord {
		assert!(z <= 31, "z ({z}) must be <= 31");

		let zoom: f64 = 2.0f64.powi(z as i32);
		let x = zoom * (lon / 360.0 + 0.5);
		let y = zoom * (0.5 - 0.5 * (lat * PI / 360.0 + PI / 4.0).tan().ln() / PI);

		TileCoord {
			z,
			x: x.floor().min(zoom - 1.0).max(0.0) as u32,
			y: y.floor().min(zoom - 1.0).max(0.0) as u32,
		}
	}

	/// The longitude/latitude of this tile's north-west corner.
	pub fn as_geo(&self) -> [f64; 2] {
		[
			tile_to_lon(self.x as f64, self.z),
			tile_to_lat(self.y as f64, self.z),
		]
	}
}

/// Longitude of the western edge of tile column `x` at zoom `z`.
pub fn tile_to_lon(x: f64, z: u8) -> f64 {
	let zoom: f64 = 2.0f64.powi(z as i32);
	(x / zoom - 0.5) * 360.0
}

/// Latitude of the northern edge of tile row `y` at zoom `z`.
pub fn tile_to_lat(y: f64, z: u8) -> f64 {
	let zoom: f64 = 2.0f64.powi(z as i32);
	((PI * (1.0 - 2.0 * y / zoom)).exp().atan() / PI - 0.25) * 360.0
}

impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_fmt(format_args!("TileCoord({}/{}/{})", self.z, self.x, self.y))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_checks_grid() {
		assert!(TileCoord::new(0, 0, 0).is_ok());
		assert!(TileCoord::new(31, 17, 4).is_ok());
		assert!(matches!(
			TileCoord::new(32, 0, 0),
			Err(TileBaseError::InvalidCoordinate)
		));
		assert!(matches!(
			TileCoord::new(3, 8, 0),
			Err(TileBaseError::InvalidCoordinate)
		));
		assert!(matches!(
			TileCoord::new(3, 0, 8),
			Err(TileBaseError::InvalidCoordinate)
		));
	}

	#[test]
	fn from_geo() {
		let coord = TileCoord::from_geo(13.4, 52.5, 10);
		assert_eq!((coord.z, coord.x, coord.y), (10, 550, 335));

		let coord = TileCoord::from_geo(13.4, 52.5, 0);
		assert_eq!((coord.x, coord.y), (0, 0));
	}

	#[test]
	fn from_geo_clamps_into_grid() {
		let coord = TileCoord::from_geo(200.0, -89.0, 4);
		assert_eq!((coord.x, coord.y), (15, 15));

		let coord = TileCoord::from_geo(-200.0, 89.0, 4);
		assert_eq!((coord.x, coord.y), (0, 0));
	}

	#[test]
	fn as_geo() {
		let [lon, lat] = TileCoord::new(0, 0, 0).unwrap().as_geo();
		assert_eq!(lon, -180.0);
		assert!((lat - 85.05112877980659).abs() < 1e-9);

		let [lon, lat] = TileCoord::new(1, 1, 1).unwrap().as_geo();
		assert_eq!(lon, 0.0);
		assert!(lat.abs() < 1e-9);
	}

	#[test]
	fn debug() {
		let coord = TileCoord::new(3, 1, 2).unwrap();
		assert_eq!(format!("{coord:?}"), "TileCoord(3/1/2)");
	}
}
