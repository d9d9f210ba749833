//! Inclusive tile bounding boxes, one per zoom level of a pyramid.
//!
//! The row-major index computed here is the single source of truth for the
//! order of address records: zoom ascending, then y ascending, then x
//! ascending, with inclusive ranges (`width = max - min + 1`). The converter
//! and the reader both derive their positions from it.

use super::TileCoord;
use crate::error::{Result, TileBaseError};
use std::fmt::{self, Debug};

/// An inclusive rectangle of tile indices at one zoom level.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct TileBBox {
	pub z: u8,
	pub x_min: u32,
	pub y_min: u32,
	pub x_max: u32,
	pub y_max: u32,
}

impl TileBBox {
	/// Fails with `InvalidConfig` unless `x_min <= x_max` and
	/// `y_min <= y_max`.
	pub fn new(z: u8, x_min: u32, y_min: u32, x_max: u32, y_max: u32) -> Result<TileBBox> {
		if x_min > x_max {
			return Err(TileBaseError::InvalidConfig(format!(
				"x_min ({x_min}) must be <= x_max ({x_max})"
			)));
		}
		if y_min > y_max {
			return Err(TileBaseError::InvalidConfig(format!(
				"y_min ({y_min}) must be <= y_max ({y_max})"
			)));
		}
		Ok(TileBBox {
			z,
			x_min,
			y_min,
			x_max,
			y_max,
		})
	}

	/// Covers geographic bounds `[west, south, east, north]` at zoom `z`,
	/// clamping latitude to the Web-Mercator limit of 85° and longitude
	/// to 179° before projecting the two corners. Inverted bounds fail
	/// with `InvalidConfig`.
	pub fn from_geo_bounds(z: u8, bounds: &[f64; 4]) -> Result<TileBBox> {
		let west = bounds[0].max(-179.0);
		let south = bounds[1].max(-85.0);
		let east = bounds[2].min(179.0);
		let north = bounds[3].min(85.0);

		let nw = TileCoord::from_geo(west, north, z);
		let se = TileCoord::from_geo(east, south, z);

		TileBBox::new(z, nw.x, nw.y, se.x, se.y)
	}

	pub fn width(&self) -> u64 {
		(self.x_max - self.x_min) as u64 + 1
	}

	pub fn height(&self) -> u64 {
		(self.y_max - self.y_min) as u64 + 1
	}

	pub fn count_tiles(&self) -> u64 {
		self.width() * self.height()
	}

	/// Checks that the coordinate lies inside this bbox. Each side of the
	/// rectangle reports its own error kind.
	pub fn check_coord(&self, coord: &TileCoord) -> Result<()> {
		if coord.x < self.x_min {
			return Err(TileBaseError::XBelowRange);
		}
		if coord.x > self.x_max {
			return Err(TileBaseError::XAboveRange);
		}
		if coord.y < self.y_min {
			return Err(TileBaseError::YBelowRange);
		}
		if coord.y > self.y_max {
			return Err(TileBaseError::YAboveRange);
		}
		Ok(())
	}

	/// Position of `coord` within this bbox in canonical order: y ascending,
	/// then x ascending. The coordinate must already pass `check_coord`.
	pub fn row_major_index(&self, coord: &TileCoord) -> u64 {
		(coord.y - self.y_min) as u64 * self.width() + (coord.x - self.x_min) as u64
	}

	pub fn as_array(&self) -> [u32; 4] {
		[self.x_min, self.y_min, self.x_max, self.y_max]
	}
}

impl Debug for TileBBox {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_fmt(format_args!(
			"TileBBox({}: [{},{},{},{}])",
			self.z, self.x_min, self.y_min, self.x_max, self.y_max
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_rejects_inverted_bounds() {
		assert!(matches!(
			TileBBox::new(8, 51, 97, 50, 98),
			Err(TileBaseError::InvalidConfig(msg)) if msg.contains("x_min")
		));
		assert!(matches!(
			TileBBox::new(8, 50, 99, 51, 98),
			Err(TileBaseError::InvalidConfig(msg)) if msg.contains("y_min")
		));
	}

	#[test]
	fn geometry() {
		let bbox = TileBBox::new(8, 50, 97, 51, 98).unwrap();
		assert_eq!(bbox.width(), 2);
		assert_eq!(bbox.height(), 2);
		assert_eq!(bbox.count_tiles(), 4);
		assert_eq!(bbox.as_array(), [50, 97, 51, 98]);
	}

	#[test]
	fn check_coord_reports_each_side() {
		let bbox = TileBBox::new(8, 50, 97, 51, 98).unwrap();
		let check = |x, y| bbox.check_coord(&TileCoord::new(8, x, y).unwrap());

		assert!(check(50, 97).is_ok());
		assert!(check(51, 98).is_ok());
		assert!(matches!(check(49, 97), Err(TileBaseError::XBelowRange)));
		assert!(matches!(check(52, 97), Err(TileBaseError::XAboveRange)));
		assert!(matches!(check(50, 96), Err(TileBaseError::YBelowRange)));
		assert!(matches!(check(50, 99), Err(TileBaseError::YAboveRange)));
	}

	#[test]
	fn row_major_order() {
		// 3 columns, 2 rows: x advances fastest, y only at the end of a row
		let bbox = TileBBox::new(4, 10, 5, 12, 6).unwrap();
		let index = |x, y| bbox.row_major_index(&TileCoord::new(4, x, y).unwrap());

		assert_eq!(index(10, 5), 0);
		assert_eq!(index(11, 5), 1);
		assert_eq!(index(12, 5), 2);
		assert_eq!(index(10, 6), 3);
		assert_eq!(index(12, 6), 5);
	}

	#[test]
	fn from_geo_bounds() {
		let bounds = [-80.0, -40.0, 80.0, 40.0];
		let bbox = TileBBox::from_geo_bounds(2, &bounds).unwrap();
		assert_eq!(bbox.as_array(), [1, 1, 2, 2]);

		let bbox = TileBBox::from_geo_bounds(3, &bounds).unwrap();
		assert_eq!(bbox.as_array(), [2, 3, 5, 4]);
	}

	#[test]
	fn from_geo_bounds_single_tile_pyramid() {
		// bounds tucked into the north-west corner cover tile (0,0) at every zoom
		let bounds = [-180.0, 84.95, -179.95, 85.05];
		for z in 0..=8 {
			let bbox = TileBBox::from_geo_bounds(z, &bounds).unwrap();
			assert_eq!(bbox.as_array(), [0, 0, 0, 0], "zoom {z}");
		}
	}
}
